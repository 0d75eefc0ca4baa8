//! Fetchcache - interactive TTL-cached fetch client
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration from environment variables
//! 3. Create the cache, which starts its background sweep task
//! 4. Wrap an HTTP client around the cache
//! 5. Run the interactive loop until exit, end of input, or a signal
//! 6. Stop and join the sweep task before exiting

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fetchcache::repl::Repl;
use fetchcache::{Cache, CachedClient, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fetchcache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "configuration loaded: cache_ttl={}s, sweep_interval={}s, request_timeout={}s",
        config.cache_ttl, config.sweep_interval, config.request_timeout
    );

    let cache = Cache::with_sweep_interval(config.ttl(), config.sweep());
    info!("cache initialized, sweep task started");

    let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
    let client = CachedClient::with_http_client(http, cache.clone());

    let mut repl = Repl::new(client);
    tokio::select! {
        result = repl.run() => {
            result?;
            info!("input closed, shutting down");
        }
        _ = shutdown_signal() => {
            warn!("interrupted, shutting down");
        }
    }

    cache.shutdown().await;
    info!("sweep task stopped, goodbye");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

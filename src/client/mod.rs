//! Cached HTTP Client
//!
//! Fetch layer that consults the cache before touching the network. The
//! fully-qualified request URL is the cache key. Raw successful response
//! bodies are stored unconditionally before any decoding happens, so a
//! decode failure never costs the cached bytes.

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::cache::Cache;
use crate::error::{FetchError, Result};

// == Fetched ==
/// Outcome of a fetch: the raw body plus where it came from.
#[derive(Debug, Clone)]
pub struct Fetched {
    /// Raw response body
    pub body: Vec<u8>,
    /// True if the body was served from the cache without a network call
    pub from_cache: bool,
}

// == Cached Client ==
/// HTTP client with a TTL cache in front of it.
#[derive(Clone)]
pub struct CachedClient {
    http: reqwest::Client,
    cache: Cache,
}

impl CachedClient {
    // == Constructor ==
    /// Wraps `cache` around a default `reqwest` client.
    pub fn new(cache: Cache) -> Self {
        Self {
            http: reqwest::Client::new(),
            cache,
        }
    }

    /// Wraps `cache` around an explicit client, for callers that configure
    /// timeouts or proxies themselves.
    pub fn with_http_client(http: reqwest::Client, cache: Cache) -> Self {
        Self { http, cache }
    }

    // == Fetch ==
    /// Returns the body for `url`, from the cache when a live copy exists,
    /// otherwise via HTTP GET.
    ///
    /// A non-success status is an error and nothing is cached. A successful
    /// body is stored under the URL before being returned.
    pub async fn fetch(&self, url: &str) -> Result<Fetched> {
        if let Some(body) = self.cache.get(url).await {
            debug!(url, "cache hit");
            return Ok(Fetched {
                body,
                from_cache: true,
            });
        }

        debug!(url, "cache miss, fetching");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?.to_vec();
        self.cache.add(url, body.clone()).await;
        info!(url, bytes = body.len(), "fetched and cached");

        Ok(Fetched {
            body,
            from_cache: false,
        })
    }

    // == Get JSON ==
    /// Fetches `url` and decodes the body as JSON.
    ///
    /// Decoding is this layer's job, not the cache's; a failure here leaves
    /// the cache exactly as the fetch left it.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let fetched = self.fetch(url).await?;
        serde_json::from_slice(&fetched.body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    // == Cache ==
    /// The cache behind this client.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }
}

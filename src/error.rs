//! Error types for the fetch layer
//!
//! The cache itself has no error taxonomy: `add` and `get` are total over
//! their inputs, and a miss is `None`, not an error. Everything that can
//! actually fail lives at the HTTP boundary.

use thiserror::Error;

// == Fetch Error Enum ==
/// Unified error type for the cached fetch layer.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure: connect, timeout, or body read
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("unexpected status {status} fetching {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body was not the JSON the caller asked for
    #[error("failed to decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the fetch layer.
pub type Result<T> = std::result::Result<T, FetchError>;

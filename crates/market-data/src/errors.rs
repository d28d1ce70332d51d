//! Error types for the market data crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// Cache misses are deliberately absent: a failed or stale cache read is
/// recovered inside the cache gate (see [`crate::cache::CacheState`]) and
/// never surfaces to callers.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The listing type key does not name a known exchange.
    /// Surfaced immediately, before any fetch is attempted.
    #[error("Unknown exchange: {0}")]
    UnknownExchange(String),

    /// A quote flag character has no one- or two-character match in the
    /// flag table. Fails the whole decode.
    #[error("Unknown quote flag: {0}")]
    UnknownFlag(char),

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A provider-level failure, such as a non-success HTTP status.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// Writing a freshly fetched listing back to the cache failed.
    /// Surfaced even though the remote fetch itself succeeded.
    #[error("Cache write failed for {}: {source}", path.display())]
    CacheWriteFailed {
        /// Path of the cache entry that could not be written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_exchange_display() {
        let error = MarketDataError::UnknownExchange("lse".to_string());
        assert_eq!(format!("{}", error), "Unknown exchange: lse");
    }

    #[test]
    fn test_unknown_flag_display() {
        let error = MarketDataError::UnknownFlag('z');
        assert_eq!(format!("{}", error), "Unknown quote flag: z");
    }

    #[test]
    fn test_provider_error_display() {
        let error = MarketDataError::ProviderError {
            provider: "NASDAQ".to_string(),
            message: "HTTP 503 Service Unavailable".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Provider error: NASDAQ - HTTP 503 Service Unavailable"
        );
    }

    #[test]
    fn test_cache_write_failed_carries_path() {
        let error = MarketDataError::CacheWriteFailed {
            path: PathBuf::from("./cache/symbols.nyse.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let rendered = format!("{}", error);
        assert!(rendered.contains("symbols.nyse.json"));
        assert!(rendered.contains("denied"));
    }
}

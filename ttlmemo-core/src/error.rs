//! Error types for ttlmemo.
//!
//! Two families live here. `MemoError` covers everything that can go wrong
//! while building or configuring a cache; it is reported at construction time
//! so a misconfigured cache never reaches its first `fetch`. `FetchError` is
//! what a single `fetch` resolves to when no value could be produced.

use thiserror::Error;

/// Result type alias using `MemoError`.
pub type Result<T> = std::result::Result<T, MemoError>;

/// Construction and configuration errors.
#[derive(Debug, Error)]
pub enum MemoError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// No producer was supplied to the builder.
    #[error("Cache requires a producer")]
    MissingProducer,

    /// TTL below zero.
    #[error("Invalid ttl: {0}ms (must be >= 0)")]
    InvalidTtl(i64),

    /// Sweep interval of zero.
    #[error("Invalid sweep interval: {0}ms (must be >= {}ms)", crate::constants::MIN_SWEEP_INTERVAL_MS)]
    InvalidSweepInterval(u64),

    /// A background sweep was requested outside of a Tokio runtime.
    #[error("Background sweep requires a running Tokio runtime")]
    NoRuntime,

    /// Malformed configuration value.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // LOADING ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// File I/O error while reading a configuration file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON deserialization error while reading a configuration file.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl MemoError {
    /// Returns true if the error stems from an invalid configuration value
    /// rather than from reading it.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            MemoError::MissingProducer
                | MemoError::InvalidTtl(_)
                | MemoError::InvalidSweepInterval(_)
                | MemoError::ConfigError(_)
        )
    }
}

/// Outcome of a failed `fetch`.
///
/// The same error is delivered to every caller that was waiting on the key,
/// which is why it must be `Clone`. Wrap non-cloneable producer errors in an
/// `Arc` before returning them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError<E> {
    /// The producer failed. The error is passed through untouched.
    #[error("Producer failed: {0}")]
    Producer(E),

    /// The producer task panicked or was aborted before reporting a result.
    #[error("Producer was abandoned before completing")]
    Abandoned,
}

impl<E> FetchError<E> {
    /// Returns the producer's error, if this failure came from the producer.
    pub fn producer_error(&self) -> Option<&E> {
        match self {
            FetchError::Producer(err) => Some(err),
            FetchError::Abandoned => None,
        }
    }

    /// Consumes the error, returning the producer's error if there is one.
    pub fn into_producer_error(self) -> Option<E> {
        match self {
            FetchError::Producer(err) => Some(err),
            FetchError::Abandoned => None,
        }
    }

    /// Returns true if the producer never reported a result.
    pub fn is_abandoned(&self) -> bool {
        matches!(self, FetchError::Abandoned)
    }
}

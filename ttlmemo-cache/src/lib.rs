//! # ttlmemo Cache
//!
//! Asynchronous memoization with time-based expiry and single-flight
//! coalescing.
//!
//! - A live entry is returned immediately.
//! - A miss runs the producer once per key; concurrent callers for the same
//!   key share that one call and its outcome.
//! - Successful values are kept for the TTL; failures are never cached.
//! - Expiry is checked on read. An optional background task reclaims memory
//!   held by expired entries.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;
mod config;
mod entry;
mod stats;
mod sweep;

pub use cache::{CacheBuilder, CacheKey, CacheValue, TtlCache};
pub use config::CacheConfig;
pub use stats::CacheStats;
pub use ttlmemo_core::{FetchError, MemoError, Producer, Result};

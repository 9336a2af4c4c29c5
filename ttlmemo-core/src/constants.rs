//! Configuration constants for ttlmemo.
//!
//! Defaults used when a value is not supplied explicitly, and the names of
//! the environment variables read by `CacheConfig::from_env`.

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default time-to-live for cached values, in milliseconds.
pub const DEFAULT_TTL_MS: i64 = 5_000;

/// Smallest accepted background sweep interval, in milliseconds.
/// A zero interval would make `tokio::time::interval` panic.
pub const MIN_SWEEP_INTERVAL_MS: u64 = 1;

// ═══════════════════════════════════════════════════════════════════════════════
// ENVIRONMENT
// ═══════════════════════════════════════════════════════════════════════════════

/// Environment variable holding the TTL in milliseconds.
pub const ENV_TTL_MS: &str = "TTLMEMO_TTL_MS";

/// Environment variable holding the sweep interval in milliseconds.
/// Unset or empty disables the background sweep.
pub const ENV_SWEEP_INTERVAL_MS: &str = "TTLMEMO_SWEEP_INTERVAL_MS";

//! Cache configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use ttlmemo_core::constants::{
    DEFAULT_TTL_MS, ENV_SWEEP_INTERVAL_MS, ENV_TTL_MS, MIN_SWEEP_INTERVAL_MS,
};
use ttlmemo_core::error::{MemoError, Result};

/// Cache configuration.
///
/// The TTL is kept as a signed millisecond count so that a negative value
/// read from a file or the environment can be represented and rejected by
/// `validate` instead of failing somewhere inside deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Time-to-live in milliseconds
    pub ttl_ms: i64,
    /// Background sweep interval in milliseconds (None disables the sweep)
    pub sweep_interval_ms: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
            sweep_interval_ms: None,
        }
    }
}

impl CacheConfig {
    /// Creates a config with the given TTL and no background sweep.
    ///
    /// The TTL is truncated to whole milliseconds.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl_ms: i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX),
            sweep_interval_ms: None,
        }
    }

    /// Enables the background sweep.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval_ms = Some(u64::try_from(interval.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Disables the background sweep.
    pub fn without_sweep(mut self) -> Self {
        self.sweep_interval_ms = None;
        self
    }

    /// Returns the validated TTL.
    pub fn ttl(&self) -> Result<Duration> {
        u64::try_from(self.ttl_ms)
            .map(Duration::from_millis)
            .map_err(|_| MemoError::InvalidTtl(self.ttl_ms))
    }

    /// Returns the validated sweep interval, if the sweep is enabled.
    pub fn sweep_interval(&self) -> Result<Option<Duration>> {
        match self.sweep_interval_ms {
            None => Ok(None),
            Some(ms) if ms < MIN_SWEEP_INTERVAL_MS => Err(MemoError::InvalidSweepInterval(ms)),
            Some(ms) => Ok(Some(Duration::from_millis(ms))),
        }
    }

    /// Checks every field.
    pub fn validate(&self) -> Result<()> {
        self.ttl()?;
        self.sweep_interval()?;
        Ok(())
    }

    /// Loads a config from the environment (and a `.env` file, if present).
    ///
    /// Reads `TTLMEMO_TTL_MS` and `TTLMEMO_SWEEP_INTERVAL_MS`; unset values
    /// fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads and validates a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = non_empty(lookup(ENV_TTL_MS)) {
            config.ttl_ms = raw.parse().map_err(|_| {
                MemoError::ConfigError(format!("{ENV_TTL_MS}={raw:?} is not an integer"))
            })?;
        }

        if let Some(raw) = non_empty(lookup(ENV_SWEEP_INTERVAL_MS)) {
            config.sweep_interval_ms = Some(raw.parse().map_err(|_| {
                MemoError::ConfigError(format!(
                    "{ENV_SWEEP_INTERVAL_MS}={raw:?} is not a non-negative integer"
                ))
            })?);
        }

        config.validate()?;
        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

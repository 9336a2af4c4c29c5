//! Cache counters and statistics snapshots.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Default)]
pub(crate) struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    coalesced: AtomicU64,
    producer_failures: AtomicU64,
    abandoned: AtomicU64,
}

impl CacheCounters {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_coalesced(&self) {
        self.coalesced.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.producer_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_abandoned(&self) {
        self.abandoned.fetch_add(1, Ordering::Relaxed);
    }

    /// Counter part of a snapshot; occupancy is filled in by the cache.
    pub(crate) fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
            producer_failures: self.producer_failures.load(Ordering::Relaxed),
            abandoned: self.abandoned.load(Ordering::Relaxed),
            ..CacheStats::default()
        }
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Fetches answered from a live entry
    pub hits: u64,
    /// Fetches that started a producer call
    pub misses: u64,
    /// Fetches that attached to a producer call already in flight
    pub coalesced: u64,
    /// Producer calls that returned an error
    pub producer_failures: u64,
    /// Producer calls that panicked or were aborted
    pub abandoned: u64,
    /// Stored entries (including expired)
    pub cached_entries: usize,
    /// Stored entries past their TTL, awaiting a fetch or sweep
    pub expired_entries: usize,
    /// Keys currently being produced
    pub in_flight: usize,
}

impl CacheStats {
    /// Total number of fetches observed.
    pub fn requests(&self) -> u64 {
        self.hits + self.misses + self.coalesced
    }

    /// Percentage of fetches that did not start a producer call.
    pub fn hit_rate(&self) -> f64 {
        let requests = self.requests();
        if requests == 0 {
            return 0.0;
        }
        ((self.hits + self.coalesced) as f64 / requests as f64) * 100.0
    }
}

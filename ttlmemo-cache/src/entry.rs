//! Per-key storage cells.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::Instant;

use ttlmemo_core::FetchError;

/// What a waiting caller eventually receives.
pub(crate) type Outcome<V, E> = Result<V, FetchError<E>>;

/// Channel end through which an attached caller is notified.
pub(crate) type Listener<V, E> = oneshot::Sender<Outcome<V, E>>;

/// Stored value with its creation time.
#[derive(Clone, Debug)]
pub(crate) struct CacheEntry<V> {
    pub(crate) value: V,
    pub(crate) created_at: Instant,
}

impl<V> CacheEntry<V> {
    pub(crate) fn new(value: V) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    pub(crate) fn is_live(&self, ttl: Duration) -> bool {
        self.is_live_at(Instant::now(), ttl)
    }

    /// Live iff `now - created_at < ttl`, so a zero TTL is never live.
    pub(crate) fn is_live_at(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created_at) < ttl
    }
}

/// A key is either cached or being produced, never both.
pub(crate) enum Slot<V, E> {
    Ready(CacheEntry<V>),
    InFlight(Vec<Listener<V, E>>),
}

impl<V, E> Slot<V, E> {
    pub(crate) fn is_in_flight(&self) -> bool {
        matches!(self, Slot::InFlight(_))
    }

    pub(crate) fn live_value(&self, ttl: Duration) -> Option<&V> {
        match self {
            Slot::Ready(entry) if entry.is_live(ttl) => Some(&entry.value),
            _ => None,
        }
    }
}

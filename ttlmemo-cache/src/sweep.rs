//! Periodic removal of expired entries.
//!
//! Purely a memory optimization: reads already ignore expired entries.

use std::sync::Weak;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use crate::cache::{CacheKey, CacheValue, Inner};

/// Spawns the sweep loop. The task holds only a weak reference, so it ends
/// on its own once the last cache handle is dropped.
pub(crate) fn spawn<K, V, E>(
    runtime: &Handle,
    cache: Weak<Inner<K, V, E>>,
    period: Duration,
) -> JoinHandle<()>
where
    K: CacheKey,
    V: CacheValue,
    E: CacheValue,
{
    runtime.spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let Some(inner) = cache.upgrade() else {
                trace!("cache dropped, sweep exiting");
                break;
            };
            let removed = inner.cleanup_expired();
            if removed > 0 {
                debug!(removed, "swept expired entries");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::time::sleep;

    use crate::TtlCache;

    use super::*;

    fn counting_cache(ttl: Duration, sweep: Duration) -> (TtlCache<u32, u32, String>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache = TtlCache::builder()
            .ttl(ttl)
            .sweep_interval(sweep)
            .producer(move |key: u32| {
                let calls = Arc::clone(&counter);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(key + 1)
                }
            })
            .build()
            .unwrap();
        (cache, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_expired_entries() {
        let (cache, _) = counting_cache(Duration::from_millis(50), Duration::from_millis(100));
        assert!(cache.is_sweeping());

        cache.fetch(1).await.unwrap();
        cache.fetch(2).await.unwrap();
        assert_eq!(cache.len(), 2);

        sleep(Duration::from_millis(300)).await;
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_keeps_live_entries() {
        let (cache, calls) = counting_cache(Duration::from_secs(10), Duration::from_millis(100));

        cache.fetch(1).await.unwrap();
        sleep(Duration::from_millis(500)).await;

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.fetch(1).await, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_stops_sweep() {
        let (cache, _) = counting_cache(Duration::from_millis(50), Duration::from_millis(100));

        cache.dispose();
        assert!(!cache.is_sweeping());

        cache.fetch(1).await.unwrap();
        sleep(Duration::from_millis(300)).await;

        // Expired but not swept; still invisible to reads.
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.peek(&1), None);
        assert_eq!(cache.cleanup_expired(), 1);
    }
}

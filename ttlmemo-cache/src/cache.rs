//! Single-flight memoization cache with TTL expiry.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use ttlmemo_core::error::{FetchError, MemoError, Result};
use ttlmemo_core::traits::Producer;

use crate::config::CacheConfig;
use crate::entry::{CacheEntry, Outcome, Slot};
use crate::stats::{CacheCounters, CacheStats};
use crate::sweep;

/// Bounds every cache key satisfies.
pub trait CacheKey: Hash + Eq + Clone + fmt::Debug + Send + Sync + 'static {}

impl<T> CacheKey for T where T: Hash + Eq + Clone + fmt::Debug + Send + Sync + 'static {}

/// Bounds every cached value and producer error satisfies.
///
/// Both are cloned once per waiting caller.
pub trait CacheValue: Clone + Send + Sync + 'static {}

impl<T> CacheValue for T where T: Clone + Send + Sync + 'static {}

type SharedProducer<K, V, E> = Arc<dyn Producer<K, V, Error = E>>;

/// State shared by every handle and by the producer and sweep tasks.
pub(crate) struct Inner<K, V, E> {
    slots: DashMap<K, Slot<V, E>>,
    producer: SharedProducer<K, V, E>,
    ttl: Duration,
    counters: CacheCounters,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

enum Lookup<V, E> {
    Hit(V),
    Attached(oneshot::Receiver<Outcome<V, E>>),
    Started(oneshot::Receiver<Outcome<V, E>>),
}

impl<K: CacheKey, V: CacheValue, E: CacheValue> Inner<K, V, E> {
    /// Resolves a key to either a live value or a receiver for the (possibly
    /// just registered) in-flight request. Registration happens under the
    /// shard's write lock.
    fn lookup_or_register(&self, key: &K) -> Lookup<V, E> {
        if let Some(value) = self.live_value(key) {
            self.counters.record_hit();
            trace!(?key, "cache hit");
            return Lookup::Hit(value);
        }

        // Re-checked under the write lock: another caller may have stored or
        // registered the key since the read above.
        match self.slots.entry(key.clone()) {
            Entry::Occupied(mut occupied) => {
                if let Some(value) = occupied.get().live_value(self.ttl) {
                    self.counters.record_hit();
                    trace!(?key, "cache hit");
                    return Lookup::Hit(value.clone());
                }

                let (sender, receiver) = oneshot::channel();
                if let Slot::InFlight(listeners) = occupied.get_mut() {
                    listeners.push(sender);
                    self.counters.record_coalesced();
                    debug!(?key, waiters = listeners.len(), "attached to in-flight request");
                    return Lookup::Attached(receiver);
                }

                occupied.insert(Slot::InFlight(vec![sender]));
                self.counters.record_miss();
                debug!(?key, "cache entry expired, producing");
                Lookup::Started(receiver)
            }
            Entry::Vacant(vacant) => {
                let (sender, receiver) = oneshot::channel();
                vacant.insert(Slot::InFlight(vec![sender]));
                self.counters.record_miss();
                debug!(?key, "cache miss, producing");
                Lookup::Started(receiver)
            }
        }
    }

    /// Reads a live value under the shard's read lock.
    fn live_value(&self, key: &K) -> Option<V> {
        self.slots
            .get(key)
            .and_then(|slot| slot.live_value(self.ttl).cloned())
    }

    /// Stores a successful result and fans the outcome out to every waiter.
    fn complete(&self, key: &K, result: std::result::Result<V, E>) {
        let listeners = match self.slots.entry(key.clone()) {
            Entry::Occupied(mut occupied) => {
                let listeners = match occupied.get_mut() {
                    Slot::InFlight(listeners) => std::mem::take(listeners),
                    Slot::Ready(_) => {
                        warn!(?key, "completed request found a stored entry instead of waiters");
                        return;
                    }
                };
                match &result {
                    Ok(value) => {
                        occupied.insert(Slot::Ready(CacheEntry::new(value.clone())));
                    }
                    Err(_) => {
                        occupied.remove();
                    }
                }
                listeners
            }
            Entry::Vacant(_) => {
                warn!(?key, "in-flight request vanished before completion");
                return;
            }
        };

        let outcome = result.map_err(FetchError::Producer);
        if outcome.is_err() {
            self.counters.record_failure();
            debug!(?key, waiters = listeners.len(), "producer failed, nothing cached");
        }

        for listener in listeners {
            // The caller may have given up waiting.
            let _ = listener.send(outcome.clone());
        }
    }

    /// Clears an in-flight request whose producer never reported back.
    fn abandon(&self, key: &K) {
        let removed = self.slots.remove_if(key, |_, slot| slot.is_in_flight());
        if let Some((_, Slot::InFlight(listeners))) = removed {
            self.counters.record_abandoned();
            warn!(?key, waiters = listeners.len(), "producer abandoned before completing");
            for listener in listeners {
                let _ = listener.send(Err(FetchError::Abandoned));
            }
        }
    }

    pub(crate) fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let ttl = self.ttl;
        let mut removed = 0;
        self.slots.retain(|_, slot| match slot {
            Slot::Ready(entry) if !entry.is_live_at(now, ttl) => {
                removed += 1;
                false
            }
            _ => true,
        });
        removed
    }
}

impl<K, V, E> Drop for Inner<K, V, E> {
    fn drop(&mut self) {
        if let Some(handle) = self.sweeper.get_mut().take() {
            handle.abort();
        }
    }
}

/// Marks a key in flight for the lifetime of its producer task.
///
/// If the task ends without calling `complete` (panic or abort), dropping the
/// guard releases the waiters with `FetchError::Abandoned`.
struct InFlightGuard<K: CacheKey, V: CacheValue, E: CacheValue> {
    inner: Arc<Inner<K, V, E>>,
    key: K,
    completed: bool,
}

impl<K: CacheKey, V: CacheValue, E: CacheValue> InFlightGuard<K, V, E> {
    fn new(inner: Arc<Inner<K, V, E>>, key: K) -> Self {
        Self {
            inner,
            key,
            completed: false,
        }
    }

    fn complete(mut self, result: std::result::Result<V, E>) {
        self.completed = true;
        self.inner.complete(&self.key, result);
    }
}

impl<K: CacheKey, V: CacheValue, E: CacheValue> Drop for InFlightGuard<K, V, E> {
    fn drop(&mut self) {
        if !self.completed {
            self.inner.abandon(&self.key);
        }
    }
}

/// Asynchronous memoization cache with time-based expiry.
///
/// On a miss the cache calls its producer once per key, however many callers
/// ask for that key while the call is running; every one of them receives the
/// same outcome. Successful values are kept for the configured TTL and checked
/// lazily on each read. Failures are never cached.
///
/// Handles are cheap to clone and share one store.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use ttlmemo_cache::TtlCache;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> ttlmemo_cache::Result<()> {
/// let cache: TtlCache<u64, u64, String> = TtlCache::builder()
///     .ttl(Duration::from_secs(30))
///     .producer(|n: u64| async move { Ok::<_, String>(n * n) })
///     .build()?;
///
/// assert_eq!(cache.fetch(12).await, Ok(144));
/// assert_eq!(cache.stats().misses, 1);
/// # Ok(())
/// # }
/// ```
pub struct TtlCache<K, V, E> {
    inner: Arc<Inner<K, V, E>>,
}

impl<K, V, E> Clone for TtlCache<K, V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: CacheKey, V: CacheValue, E: CacheValue> TtlCache<K, V, E> {
    /// Returns a builder.
    pub fn builder() -> CacheBuilder<K, V, E> {
        CacheBuilder::new()
    }

    /// Creates a cache from a config and a producer.
    ///
    /// Fails if the config is invalid, or if it enables the background sweep
    /// and no Tokio runtime is running.
    pub fn init<P>(config: CacheConfig, producer: P) -> Result<Self>
    where
        P: Producer<K, V, Error = E>,
    {
        Self::builder().config(config).producer(producer).build()
    }

    fn from_parts(
        producer: SharedProducer<K, V, E>,
        ttl: Duration,
        sweep_interval: Option<Duration>,
    ) -> Result<Self> {
        let runtime = match sweep_interval {
            Some(_) => Some(tokio::runtime::Handle::try_current().map_err(|_| MemoError::NoRuntime)?),
            None => None,
        };

        let inner = Arc::new(Inner {
            slots: DashMap::new(),
            producer,
            ttl,
            counters: CacheCounters::default(),
            sweeper: Mutex::new(None),
        });

        if let (Some(period), Some(runtime)) = (sweep_interval, runtime) {
            let handle = sweep::spawn(&runtime, Arc::downgrade(&inner), period);
            *inner.sweeper.lock() = Some(handle);
        }

        debug!(?ttl, ?sweep_interval, "cache created");
        Ok(Self { inner })
    }

    /// Returns the value for `key`, producing it if needed.
    ///
    /// A live entry is returned without suspending. Otherwise the caller
    /// joins the in-flight request for `key`, starting one if there is none.
    /// The producer runs on its own task, so dropping this future does not
    /// cancel the request for other waiters.
    ///
    /// # Panics
    ///
    /// Panics on a miss if called outside a Tokio runtime.
    pub async fn fetch(&self, key: K) -> std::result::Result<V, FetchError<E>> {
        let receiver = match self.inner.lookup_or_register(&key) {
            Lookup::Hit(value) => return Ok(value),
            Lookup::Attached(receiver) => receiver,
            Lookup::Started(receiver) => {
                self.spawn_producer(key);
                receiver
            }
        };

        receiver.await.unwrap_or(Err(FetchError::Abandoned))
    }

    fn spawn_producer(&self, key: K) {
        let producer = Arc::clone(&self.inner.producer);
        let guard = InFlightGuard::new(Arc::clone(&self.inner), key.clone());
        tokio::spawn(async move {
            let result = producer.produce(key).await;
            guard.complete(result);
        });
    }

    /// Returns the live value for `key` without calling the producer.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.live_value(key)
    }

    /// Removes the stored entry for `key`. Returns true if one was removed.
    ///
    /// A request in flight for `key` is left alone so its waiters still get
    /// their result.
    pub fn invalidate(&self, key: &K) -> bool {
        self.inner
            .slots
            .remove_if(key, |_, slot| !slot.is_in_flight())
            .is_some()
    }

    /// Removes every stored entry. Requests in flight are left alone.
    pub fn clear(&self) {
        self.inner.slots.retain(|_, slot| slot.is_in_flight());
    }

    /// Removes all expired entries, returning how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        self.inner.cleanup_expired()
    }

    /// Returns the number of stored entries, including expired ones.
    pub fn len(&self) -> usize {
        self.inner
            .slots
            .iter()
            .filter(|slot| !slot.value().is_in_flight())
            .count()
    }

    /// Returns true if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.inner.counters.snapshot();
        let now = Instant::now();
        for slot in self.inner.slots.iter() {
            match slot.value() {
                Slot::Ready(entry) => {
                    stats.cached_entries += 1;
                    if !entry.is_live_at(now, self.inner.ttl) {
                        stats.expired_entries += 1;
                    }
                }
                Slot::InFlight(_) => stats.in_flight += 1,
            }
        }
        stats
    }

    /// Stops the background sweep, if one is running.
    ///
    /// The cache stays usable; expired entries are still ignored on read.
    pub fn dispose(&self) {
        if let Some(handle) = self.inner.sweeper.lock().take() {
            handle.abort();
            debug!("background sweep stopped");
        }
    }

    /// Returns true while the background sweep task is running.
    pub fn is_sweeping(&self) -> bool {
        self.inner
            .sweeper
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<K: CacheKey, V: CacheValue, E: CacheValue> fmt::Debug for TtlCache<K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.inner.ttl)
            .field("slots", &self.inner.slots.len())
            .finish()
    }
}

/// Builder for `TtlCache`.
pub struct CacheBuilder<K, V, E> {
    config: CacheConfig,
    ttl: Option<Duration>,
    producer: Option<SharedProducer<K, V, E>>,
}

impl<K: CacheKey, V: CacheValue, E: CacheValue> CacheBuilder<K, V, E> {
    /// Creates a builder with the default config and no producer.
    pub fn new() -> Self {
        Self {
            config: CacheConfig::default(),
            ttl: None,
            producer: None,
        }
    }

    /// Replaces the whole config, including any TTL set before.
    pub fn config(mut self, config: CacheConfig) -> Self {
        self.config = config;
        self.ttl = None;
        self
    }

    /// Sets the time-to-live at full `Duration` precision.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Sets the time-to-live from a signed millisecond count.
    pub fn ttl_ms(mut self, ttl_ms: i64) -> Self {
        self.config.ttl_ms = ttl_ms;
        self.ttl = None;
        self
    }

    /// Enables the background sweep of expired entries.
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.config = self.config.with_sweep_interval(interval);
        self
    }

    /// Sets the producer called on a miss.
    pub fn producer<P>(mut self, producer: P) -> Self
    where
        P: Producer<K, V, Error = E>,
    {
        self.producer = Some(Arc::new(producer));
        self
    }

    /// Validates the configuration and creates the cache.
    pub fn build(self) -> Result<TtlCache<K, V, E>> {
        let producer = self.producer.ok_or(MemoError::MissingProducer)?;
        let ttl = match self.ttl {
            Some(ttl) => ttl,
            None => self.config.ttl()?,
        };
        let sweep_interval = self.config.sweep_interval()?;
        TtlCache::from_parts(producer, ttl, sweep_interval)
    }
}

impl<K: CacheKey, V: CacheValue, E: CacheValue> Default for CacheBuilder<K, V, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::future::join_all;
    use futures::FutureExt;
    use tokio::time::sleep;
    use tokio_test::{assert_pending, assert_ready};

    const DELAY: Duration = Duration::from_millis(100);

    type GreekCache = TtlCache<&'static str, Option<&'static str>, String>;

    fn greek_cache(ttl: Duration) -> (GreekCache, Arc<AtomicUsize>) {
        let table: Arc<HashMap<&'static str, &'static str>> = Arc::new(HashMap::from([
            ("a", "alpha"),
            ("b", "beta"),
            ("d", "delta"),
            ("e", "echo"),
        ]));
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let cache = TtlCache::builder()
            .ttl(ttl)
            .producer(move |key: &'static str| {
                let table = Arc::clone(&table);
                let calls = Arc::clone(&counter);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    sleep(DELAY).await;
                    if key == "x" {
                        return Err(format!("no backing data for {key}"));
                    }
                    Ok(table.get(key).copied())
                }
            })
            .build()
            .unwrap();

        (cache, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_returns_value() {
        let (cache, calls) = greek_cache(Duration::from_millis(500));

        assert_eq!(cache.fetch("a").await, Ok(Some("alpha")));
        assert_eq!(cache.fetch("b").await, Ok(Some("beta")));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_absent_value_is_cached() {
        let (cache, calls) = greek_cache(Duration::from_millis(500));

        assert_eq!(cache.fetch("c").await, Ok(None));
        assert_eq!(cache.fetch("c").await, Ok(None));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.peek(&"c"), Some(None));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_is_ready_on_first_poll() {
        let (cache, _) = greek_cache(Duration::from_millis(500));
        cache.fetch("d").await.unwrap();

        let mut hit = tokio_test::task::spawn(cache.fetch("d"));
        assert_eq!(assert_ready!(hit.poll()), Ok(Some("delta")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_miss_is_pending_until_produced() {
        let (cache, _) = greek_cache(Duration::from_millis(500));

        let mut miss = tokio_test::task::spawn(cache.fetch("e"));
        assert_pending!(miss.poll());
        assert_eq!(cache.stats().in_flight, 1);

        sleep(DELAY * 2).await;
        assert!(miss.is_woken());
        assert_eq!(assert_ready!(miss.poll()), Ok(Some("echo")));
        assert_eq!(cache.stats().in_flight, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_reproduced() {
        let (cache, calls) = greek_cache(Duration::from_millis(500));

        cache.fetch("d").await.unwrap();
        sleep(Duration::from_millis(600)).await;
        assert_eq!(cache.peek(&"d"), None);

        cache.fetch("d").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.stats().misses, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_fetches_coalesce() {
        let (cache, calls) = greek_cache(Duration::from_millis(500));

        let results = join_all((0..10).map(|_| cache.fetch("a"))).await;

        assert!(results.iter().all(|r| *r == Ok(Some("alpha"))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.coalesced, 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_shared_and_not_cached() {
        let (cache, calls) = greek_cache(Duration::from_millis(500));

        let results = join_all((0..3).map(|_| cache.fetch("x"))).await;
        for result in results {
            assert_eq!(
                result,
                Err(FetchError::Producer("no backing data for x".to_string()))
            );
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.is_empty());

        assert!(cache.fetch("x").await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.stats().producer_failures, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_and_clear() {
        let (cache, calls) = greek_cache(Duration::from_secs(60));

        cache.fetch("a").await.unwrap();
        cache.fetch("b").await.unwrap();
        assert_eq!(cache.len(), 2);

        assert!(cache.invalidate(&"a"));
        assert!(!cache.invalidate(&"a"));
        assert_eq!(cache.peek(&"a"), None);

        cache.clear();
        assert!(cache.is_empty());

        cache.fetch("b").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_keeps_in_flight_request() {
        let (cache, _) = greek_cache(Duration::from_secs(60));

        let mut pending = tokio_test::task::spawn(cache.fetch("a"));
        assert_pending!(pending.poll());

        assert!(!cache.invalidate(&"a"));
        cache.clear();
        assert_eq!(cache.stats().in_flight, 1);

        sleep(DELAY * 2).await;
        assert_eq!(assert_ready!(pending.poll()), Ok(Some("alpha")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_expired() {
        let (cache, _) = greek_cache(Duration::from_millis(500));

        cache.fetch("a").await.unwrap();
        sleep(Duration::from_millis(300)).await;
        cache.fetch("b").await.unwrap();
        sleep(Duration::from_millis(300)).await;

        let stats = cache.stats();
        assert_eq!(stats.cached_entries, 2);
        assert_eq!(stats.expired_entries, 1);

        assert_eq!(cache.cleanup_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.peek(&"b"), Some(Some("beta")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sub_millisecond_ttl_is_kept() {
        let ttl = Duration::from_micros(900);
        let (cache, calls) = greek_cache(ttl);
        assert_eq!(cache.ttl(), ttl);

        cache.fetch("a").await.unwrap();
        assert_eq!(cache.fetch("a").await, Ok(Some("alpha")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats().hits, 1);

        sleep(Duration::from_millis(1)).await;
        assert_eq!(cache.peek(&"a"), None);
    }

    #[test]
    fn test_last_ttl_setting_wins() {
        let producer = |key: u32| async move { Ok::<_, String>(key) };

        let cache = TtlCache::<u32, u32, String>::builder()
            .ttl(Duration::from_micros(250))
            .ttl_ms(40)
            .producer(producer)
            .build()
            .unwrap();
        assert_eq!(cache.ttl(), Duration::from_millis(40));

        let cache = TtlCache::<u32, u32, String>::builder()
            .config(CacheConfig::new(Duration::from_secs(2)))
            .ttl(Duration::from_micros(250))
            .producer(producer)
            .build()
            .unwrap();
        assert_eq!(cache.ttl(), Duration::from_micros(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_takes_only_a_read_lock() {
        let (cache, _) = greek_cache(Duration::from_secs(60));
        cache.fetch("d").await.unwrap();

        // A write lock on this shard would deadlock while the read guard lives.
        let _reader = cache.inner.slots.get(&"d");
        let hit = cache.fetch("d").now_or_never();
        assert_eq!(hit, Some(Ok(Some("delta"))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stray_completion_keeps_stored_entry() {
        let (cache, _) = greek_cache(Duration::from_secs(60));
        cache.fetch("d").await.unwrap();

        cache.inner.complete(&"d", Err("late failure".to_string()));
        assert_eq!(cache.peek(&"d"), Some(Some("delta")));
        assert_eq!(cache.stats().producer_failures, 0);

        cache.inner.complete(&"d", Ok(Some("other")));
        assert_eq!(cache.peek(&"d"), Some(Some("delta")));
    }

    #[test]
    fn test_missing_producer() {
        let err = GreekCache::builder().ttl(Duration::from_secs(1)).build().unwrap_err();
        assert!(matches!(err, MemoError::MissingProducer));
    }

    #[test]
    fn test_negative_ttl_rejected() {
        let err = TtlCache::<u32, u32, String>::builder()
            .ttl_ms(-1)
            .producer(|key: u32| async move { Ok::<_, String>(key) })
            .build()
            .unwrap_err();
        assert!(matches!(err, MemoError::InvalidTtl(-1)));
    }

    #[test]
    fn test_sweep_requires_runtime() {
        let config = CacheConfig::new(Duration::from_secs(1))
            .with_sweep_interval(Duration::from_millis(100));
        let err = TtlCache::<u32, u32, String>::init(config, |key: u32| async move { Ok::<_, String>(key) })
            .unwrap_err();
        assert!(matches!(err, MemoError::NoRuntime));
    }

    #[test]
    fn test_lazy_cache_needs_no_runtime_to_build() {
        let cache = TtlCache::<u32, u32, String>::init(
            CacheConfig::new(Duration::from_secs(1)),
            |key: u32| async move { Ok::<_, String>(key) },
        )
        .unwrap();
        assert_eq!(cache.ttl(), Duration::from_secs(1));
        assert!(!cache.is_sweeping());
    }
}

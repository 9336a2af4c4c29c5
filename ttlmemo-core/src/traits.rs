//! Common traits for ttlmemo.
//!
//! A cache never computes values itself; it asks a `Producer`.

use std::future::Future;

use futures::future::BoxFuture;

// ═══════════════════════════════════════════════════════════════════════════════
// PRODUCER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Computes the value for a key the cache does not hold (or holds expired).
///
/// The returned future is `'static` because the cache drives it on its own
/// task, detached from the caller that triggered the miss. Implementations
/// should therefore clone whatever state they need into the future.
///
/// Any `Fn(K) -> impl Future<Output = Result<V, E>>` closure is a producer:
///
/// ```rust
/// use ttlmemo_core::Producer;
///
/// fn assert_producer<P: Producer<String, Option<u64>, Error = String>>(_: &P) {}
///
/// let lookup = |key: String| async move {
///     Ok::<_, String>(key.parse::<u64>().ok())
/// };
/// assert_producer(&lookup);
/// ```
pub trait Producer<K, V>: Send + Sync + 'static {
    /// Error returned when no value can be computed.
    type Error;

    /// Starts computing the value for `key`.
    fn produce(&self, key: K) -> BoxFuture<'static, Result<V, Self::Error>>;
}

impl<K, V, E, F, Fut> Producer<K, V> for F
where
    F: Fn(K) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<V, E>> + Send + 'static,
{
    type Error = E;

    fn produce(&self, key: K) -> BoxFuture<'static, Result<V, E>> {
        Box::pin((self)(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    struct TableProducer {
        table: Arc<HashMap<&'static str, &'static str>>,
    }

    impl Producer<&'static str, Option<&'static str>> for TableProducer {
        type Error = String;

        fn produce(&self, key: &'static str) -> BoxFuture<'static, Result<Option<&'static str>, String>> {
            let table = Arc::clone(&self.table);
            Box::pin(async move { Ok(table.get(key).copied()) })
        }
    }

    #[tokio::test]
    async fn test_closure_producer() {
        let producer = |key: u32| async move {
            if key == 0 {
                Err("zero".to_string())
            } else {
                Ok(key * 2)
            }
        };

        assert_eq!(Producer::<u32, u32>::produce(&producer, 21).await, Ok(42));
        assert_eq!(Producer::<u32, u32>::produce(&producer, 0).await, Err("zero".to_string()));
    }

    #[tokio::test]
    async fn test_struct_producer() {
        let table = Arc::new(HashMap::from([("a", "alpha"), ("b", "beta")]));
        let producer = TableProducer { table };

        assert_eq!(producer.produce("a").await, Ok(Some("alpha")));
        assert_eq!(producer.produce("c").await, Ok(None));
    }

    #[tokio::test]
    async fn test_producer_as_trait_object() {
        let producer: Arc<dyn Producer<u32, String, Error = String>> =
            Arc::new(|key: u32| async move { Ok::<_, String>(format!("value-{key}")) });

        assert_eq!(producer.produce(7).await, Ok("value-7".to_string()));
    }
}

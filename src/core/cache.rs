use crate::utils::error::{ContentError, Result};
use moka::future::Cache;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Read-through cache with a fixed time-to-live per entry.
///
/// Only successful fetches are stored. Callers that miss the same key at the
/// same time share one upstream fetch and its outcome.
pub struct ReadThroughCache<T> {
    ttl: Duration,
    cache: Cache<&'static str, T>,
}

impl<T: Clone + Send + Sync + 'static> ReadThroughCache<T> {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder().time_to_live(ttl).build();

        Self { ttl, cache }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get_or_fetch<F, Fut>(&self, key: &'static str, fetch: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let fetch = fetch();
        self.cache
            .try_get_with(key, async move {
                tracing::debug!("Cache miss for '{}', fetching", key);
                fetch.await
            })
            .await
            .map_err(ContentError::from_shared)
    }

    /// Whether `key` holds an unexpired value.
    pub async fn is_fresh(&self, key: &'static str) -> bool {
        self.cache.get(&key).await.is_some()
    }

    pub async fn invalidate(&self, key: &'static str) {
        self.cache.invalidate(&key).await;
    }
}

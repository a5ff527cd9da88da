//! Cache-keyed fetch deduplication.
//!
//! Components declare a cache key and a fetcher; the cache guarantees that
//! concurrent requests for one key coalesce into a single backend call and
//! that the latest resolved value is shared until a mutation explicitly
//! invalidates the key. There is no automatic dependency tracking - explicit
//! invalidation after a successful command is the only cross-component
//! invalidation path.

pub mod debounce;
pub mod poll;

use std::sync::Arc;

use moka::future::Cache;

use openrad_core::PageQuery;

pub use debounce::SearchTask;
pub use poll::{PollOutcome, StatusPoller};

/// Upper bound on distinct cached keys.
const MAX_ENTRIES: u64 = 1000;

/// Cache key for a paginated resource fetch.
///
/// Two calls with the same base path and paging state produce the same key
/// and therefore share one request. The page index is the caller-space one
/// (zero-based for grids), not the wire page.
#[must_use]
pub fn cache_key(base_path: &str, page: &PageQuery) -> String {
    format!(
        "{base_path}?page={}&pageSize={}&orderBy={}",
        page.page,
        page.page_size,
        page.order_by.as_deref().unwrap_or_default()
    )
}

/// A per-resource fetch cache with request coalescing.
///
/// Values are whole response envelopes, cloned out to every subscriber of a
/// key. Failed fetches are not cached: every caller of the failing round
/// receives the same shared error and the next call retries.
pub struct QueryCache<T> {
    cache: Cache<String, T>,
}

impl<T> QueryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().max_capacity(MAX_ENTRIES).build(),
        }
    }

    /// Resolve `key`, running `fetch` only when the key is neither cached
    /// nor already being fetched by another caller.
    ///
    /// # Errors
    ///
    /// Returns the fetch error, shared between all callers that were
    /// coalesced into the failing request.
    pub async fn get_or_fetch<F, E>(&self, key: &str, fetch: F) -> Result<T, Arc<E>>
    where
        F: Future<Output = Result<T, E>>,
        E: Send + Sync + 'static,
    {
        self.cache.try_get_with(key.to_string(), fetch).await
    }

    /// The cached value for `key`, if present.
    pub async fn get(&self, key: &str) -> Option<T> {
        self.cache.get(key).await
    }

    /// Drop `key` so the next fetch hits the backend again.
    ///
    /// Called after a mutating command succeeds and the listing under this
    /// key is known stale.
    pub async fn invalidate(&self, key: &str) {
        self.cache.invalidate(key).await;
    }
}

impl<T> Default for QueryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[test]
    fn test_cache_key_is_deterministic() {
        let page = PageQuery::zero_based().page(2).order_by("name");
        let a = cache_key("/users", &page);
        let b = cache_key("/users", &page.clone());
        assert_eq!(a, b);
        assert_eq!(a, "/users?page=2&pageSize=10&orderBy=name");
    }

    #[test]
    fn test_cache_key_uses_caller_space_page() {
        // The key tracks the grid's own page index; only the wire codec
        // shifts zero-based pages.
        let page = PageQuery::zero_based();
        assert_eq!(cache_key("/users", &page), "/users?page=0&pageSize=10&orderBy=");
    }

    #[tokio::test]
    async fn test_concurrent_fetches_coalesce() {
        let cache: QueryCache<String> = QueryCache::new();
        let calls = AtomicU32::new(0);

        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, std::convert::Infallible>("value".to_string())
        };

        let (a, b) = tokio::join!(
            cache.get_or_fetch("/patients?page=0", fetch()),
            cache.get_or_fetch("/patients?page=0", fetch()),
        );
        assert_eq!(a.unwrap(), "value");
        assert_eq!(b.unwrap(), "value");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let cache: QueryCache<u32> = QueryCache::new();
        let calls = AtomicU32::new(0);

        let fetch = || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Ok::<_, std::convert::Infallible>(n) }
        };

        let first = cache.get_or_fetch("k", fetch()).await.unwrap();
        let cached = cache.get_or_fetch("k", fetch()).await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(cached, 1);

        cache.invalidate("k").await;
        let refetched = cache.get_or_fetch("k", fetch()).await.unwrap();
        assert_eq!(refetched, 3);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let cache: QueryCache<u32> = QueryCache::new();

        let failed: Result<u32, Arc<&str>> =
            cache.get_or_fetch("k", async { Err("boom") }).await;
        assert!(failed.is_err());

        let recovered = cache
            .get_or_fetch("k", async { Ok::<_, &str>(7) })
            .await
            .unwrap();
        assert_eq!(recovered, 7);
    }
}

//! Integration tests for cache-keyed fetch deduplication.
//!
//! Run with: `cargo test -p openrad-integration-tests`

use openrad_client::ApiClient;
use openrad_client::fetch::{QueryCache, cache_key};
use openrad_core::{PageQuery, Paged, Patient, SearchQuery};
use openrad_integration_tests::{MockBackend, member_session_provider};

fn search_for(page: &PageQuery) -> SearchQuery {
    SearchQuery {
        page: page.clone(),
        search: String::new(),
    }
}

#[tokio::test]
async fn test_identical_keys_trigger_exactly_one_request() {
    let backend = MockBackend::spawn().await;
    let api = ApiClient::new(&backend.client_config(), member_session_provider());
    let cache: QueryCache<Paged<Patient>> = QueryCache::new();

    let page = PageQuery::zero_based();
    let key = cache_key("/patients", &page);
    let query = search_for(&page);

    let (a, b) = tokio::join!(
        cache.get_or_fetch(&key, api.get_patients(&query)),
        cache.get_or_fetch(&key, api.get_patients(&query)),
    );

    let a = a.expect("first subscriber resolves");
    let b = b.expect("second subscriber resolves");
    assert_eq!(a.items().len(), b.items().len());
    assert_eq!(backend.hits("GET /api/patients"), 1);
}

#[tokio::test]
async fn test_distinct_pages_fetch_separately() {
    let backend = MockBackend::spawn().await;
    let api = ApiClient::new(&backend.client_config(), member_session_provider());
    let cache: QueryCache<Paged<Patient>> = QueryCache::new();

    for page_index in 0..2 {
        let page = PageQuery::zero_based().page(page_index);
        let key = cache_key("/patients", &page);
        cache
            .get_or_fetch(&key, api.get_patients(&search_for(&page)))
            .await
            .expect("fetch");
    }

    assert_eq!(backend.hits("GET /api/patients"), 2);
}

#[tokio::test]
async fn test_explicit_invalidation_is_the_only_refetch_path() {
    let backend = MockBackend::spawn().await;
    let api = ApiClient::new(&backend.client_config(), member_session_provider());
    let cache: QueryCache<Paged<Patient>> = QueryCache::new();

    let page = PageQuery::zero_based();
    let key = cache_key("/patients", &page);

    cache
        .get_or_fetch(&key, api.get_patients(&search_for(&page)))
        .await
        .expect("initial fetch");
    cache
        .get_or_fetch(&key, api.get_patients(&search_for(&page)))
        .await
        .expect("cached read");
    assert_eq!(backend.hits("GET /api/patients"), 1);

    // A mutation succeeded elsewhere; the listing is stale now.
    cache.invalidate(&key).await;

    cache
        .get_or_fetch(&key, api.get_patients(&search_for(&page)))
        .await
        .expect("refetch");
    assert_eq!(backend.hits("GET /api/patients"), 2);
}

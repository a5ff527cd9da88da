//! Integration tests for debounced organization search.
//!
//! Run with: `cargo test -p openrad-integration-tests`

use std::time::Duration;

use openrad_client::ApiClient;
use openrad_client::fetch::SearchTask;
use openrad_core::{OrgShortDetails, Paged, SearchQuery};
use openrad_integration_tests::{MockBackend, member_session_provider};

/// Short quiet period so the test runs in real time.
const TEST_DELAY: Duration = Duration::from_millis(50);

#[tokio::test]
async fn test_rapid_keystrokes_coalesce_into_one_request() {
    let backend = MockBackend::spawn().await;
    let api = ApiClient::new(&backend.client_config(), member_session_provider());

    let task: SearchTask<Paged<OrgShortDetails>> = SearchTask::new(TEST_DELAY);
    let mut results = task.subscribe();

    // "acme" typed, then "acme-health" within the quiet period.
    let api_first = api.clone();
    task.submit(async move {
        api_first
            .search_organizations(&SearchQuery::new("acme"))
            .await
            .expect("search")
    });

    let api_second = api.clone();
    task.submit(async move {
        api_second
            .search_organizations(&SearchQuery::new("acme-health"))
            .await
            .expect("search")
    });

    results.changed().await.expect("a result is published");
    let page = results.borrow().clone().expect("published value");
    assert_eq!(
        page.items().first().map(|org| org.name.as_str()),
        Some("acme-health")
    );

    // Only the surviving submission reached the backend.
    assert_eq!(backend.search_terms(), vec!["acme-health".to_string()]);
    assert_eq!(backend.hits("GET /api/organizations/search"), 1);
}

#[tokio::test]
async fn test_cancel_suppresses_the_pending_request() {
    let backend = MockBackend::spawn().await;
    let api = ApiClient::new(&backend.client_config(), member_session_provider());

    let task: SearchTask<Paged<OrgShortDetails>> = SearchTask::new(TEST_DELAY);
    let results = task.subscribe();

    let api_clone = api.clone();
    task.submit(async move {
        api_clone
            .search_organizations(&SearchQuery::new("acme"))
            .await
            .expect("search")
    });

    // The input was cleared before the quiet period elapsed.
    task.cancel();

    tokio::time::sleep(TEST_DELAY * 4).await;
    assert!(results.borrow().is_none());
    assert_eq!(backend.hits("GET /api/organizations/search"), 0);
}

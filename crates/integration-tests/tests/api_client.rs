//! Integration tests for the API client's envelope and error contract.
//!
//! Drives the real `ApiClient` against the in-process mock backend.
//!
//! Run with: `cargo test -p openrad-integration-tests`

use std::sync::Arc;

use openrad_client::session::RequestSession;
use openrad_client::{ApiClient, ApiError};
use openrad_core::{SearchQuery, UserRole};
use openrad_integration_tests::{MockBackend, TEST_PASSWORD, member_session_provider};

#[tokio::test]
async fn test_bearer_token_is_attached_when_signed_in() {
    let backend = MockBackend::spawn().await;
    let api = ApiClient::new(&backend.client_config(), member_session_provider());

    let result = api.get_patients(&SearchQuery::new("")).await.expect("request");
    assert!(result.is_ok());
    assert_eq!(
        backend.last_authorization().as_deref(),
        Some("Bearer member-token")
    );
}

#[tokio::test]
async fn test_anonymous_requests_carry_no_bearer() {
    let backend = MockBackend::spawn().await;
    let api = ApiClient::new(
        &backend.client_config(),
        Arc::new(RequestSession::anonymous()),
    );

    let _ = api.get_patients(&SearchQuery::new("")).await.expect("request");
    assert!(backend.last_authorization().is_none());
}

#[tokio::test]
async fn test_http_400_is_a_domain_failure_not_an_exception() {
    let backend = MockBackend::spawn().await;
    let api = ApiClient::new(&backend.client_config(), member_session_provider());

    let envelope = api.get_organization("missing").await.expect("no exception");
    assert!(!envelope.success);
    assert!(envelope.data.is_none());
    assert_eq!(envelope.error_message(), Some("not found"));
}

#[tokio::test]
async fn test_http_500_raises_a_distinguishable_error() {
    let backend = MockBackend::spawn().await;
    let api = ApiClient::new(&backend.client_config(), member_session_provider());

    let error = api
        .get_organization("broken")
        .await
        .expect_err("500 must not parse as a domain result");

    match error {
        ApiError::Status {
            status,
            status_text,
            body,
        } => {
            assert_eq!(status, 500);
            assert_eq!(status_text, "Internal Server Error");
            assert_eq!(body, "backend exploded");
        }
        other => panic!("expected a status error, got: {other}"),
    }
}

#[tokio::test]
async fn test_success_envelope_upholds_invariants() {
    let backend = MockBackend::spawn().await;
    let api = ApiClient::new(&backend.client_config(), member_session_provider());

    let envelope = api.get_organization("acme-health").await.expect("request");
    assert!(envelope.success);
    assert!(envelope.error.is_none());
    let organization = envelope.data.expect("success carries data");
    assert_eq!(organization.dicom_url, "https://pacs.acme.test/dicomweb");
}

#[tokio::test]
async fn test_credential_exchange_produces_a_session() {
    let backend = MockBackend::spawn().await;
    let api = ApiClient::new(
        &backend.client_config(),
        Arc::new(RequestSession::anonymous()),
    );

    let session = api
        .sign_in("admin@openrad.io", TEST_PASSWORD)
        .await
        .expect("exchange")
        .expect("accepted credentials yield a session");

    assert_eq!(session.user.role, Some(UserRole::SuperAdmin));
    assert_eq!(session.access_token, "token-for-admin@openrad.io");
    assert!(!session.is_expired());
}

#[tokio::test]
async fn test_rejected_credentials_yield_no_session() {
    let backend = MockBackend::spawn().await;
    let api = ApiClient::new(
        &backend.client_config(),
        Arc::new(RequestSession::anonymous()),
    );

    let session = api
        .sign_in("doc@clinic.org", "wrong-password")
        .await
        .expect("a rejection is not a transport error");
    assert!(session.is_none());
}

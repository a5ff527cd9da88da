//! Integration test harness for OpenRad.
//!
//! Spawns an in-process mock of the backend REST API on a random port and
//! hands out client/portal configurations pointing at it. The mock records
//! what it saw (request counts, bearer headers, search terms) so tests can
//! assert on wire behavior, and exposes a mutable prediction status so
//! polling tests can drive a series through its lifecycle.
//!
//! Run with: `cargo test -p openrad-integration-tests`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::json;

use openrad_client::ClientConfig;
use openrad_client::{Session, SessionProvider};
use openrad_core::{
    Envelope, OrgShortDetails, Organization, Paged, Patient, PredictionStatus, Series, User,
};
use openrad_portal::config::PortalConfig;

/// Password every mock user accepts.
pub const TEST_PASSWORD: &str = "correct-horse-battery-staple";

/// What the mock backend observed.
#[derive(Debug, Default)]
pub struct MockState {
    /// Request counts keyed by `"METHOD path"`.
    hits: Mutex<HashMap<String, u32>>,
    /// Authorization header seen on the most recent `/api` request.
    last_authorization: Mutex<Option<String>>,
    /// Search terms received by the organization search endpoint.
    search_terms: Mutex<Vec<String>>,
    /// Prediction status the series endpoint reports.
    series_status: Mutex<PredictionStatus>,
}

impl MockState {
    fn record(&self, method: &str, path: &str, headers: &HeaderMap) {
        if let Ok(mut hits) = self.hits.lock() {
            *hits.entry(format!("{method} {path}")).or_insert(0) += 1;
        }
        if let Ok(mut auth) = self.last_authorization.lock() {
            *auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string);
        }
    }
}

/// An in-process mock of the backend REST API.
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    /// Bind a random local port and serve the mock.
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::default());
        let app = router(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock backend");
        let addr = listener.local_addr().expect("mock backend has no address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("mock backend server failed");
        });

        Self { addr, state }
    }

    /// Client configuration pointing at this mock.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            backend_url: format!("http://{}", self.addr),
            viewer_url: "https://viewer.openrad.test".to_string(),
            ipinfo_token: SecretString::from("integration-test-token"),
        }
    }

    /// Portal configuration pointing at this mock.
    #[must_use]
    pub fn portal_config(&self) -> PortalConfig {
        PortalConfig {
            host: "127.0.0.1".parse().expect("loopback parses"),
            port: 0,
            base_url: "http://localhost:0".to_string(),
            session_secret: SecretString::from("integration-test-session-secret-0123456789"),
            client: self.client_config(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// How many times `"METHOD path"` was requested.
    #[must_use]
    pub fn hits(&self, key: &str) -> u32 {
        self.state
            .hits
            .lock()
            .map(|hits| hits.get(key).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// The Authorization header on the most recent `/api` request.
    #[must_use]
    pub fn last_authorization(&self) -> Option<String> {
        self.state
            .last_authorization
            .lock()
            .ok()
            .and_then(|auth| auth.clone())
    }

    /// Search terms the organization search endpoint received, in order.
    #[must_use]
    pub fn search_terms(&self) -> Vec<String> {
        self.state
            .search_terms
            .lock()
            .map(|terms| terms.clone())
            .unwrap_or_default()
    }

    /// Set the prediction status the series endpoint reports.
    pub fn set_series_status(&self, status: PredictionStatus) {
        if let Ok(mut current) = self.state.series_status.lock() {
            *current = status;
        }
    }
}

/// A ready-made session for client tests that skip the sign-in flow.
#[must_use]
pub fn member_session() -> Session {
    Session::from_sign_in(mock_user("doc@clinic.org"), "member-token".to_string())
}

/// Fixed session provider for client tests.
#[must_use]
pub fn member_session_provider() -> Arc<dyn SessionProvider> {
    Arc::new(openrad_client::session::RequestSession::new(member_session()))
}

// =============================================================================
// Mock backend internals
// =============================================================================

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/api/patients", get(patients))
        .route("/api/users", get(users))
        .route("/api/users/{id}", get(user))
        .route("/api/organizations/{id}", get(organization))
        .route("/api/organizations/search/{query}", get(search_organizations))
        .route("/api/studies/{id}/series", get(study_series))
        .route("/api/studies/series/predict", post(predict_series))
        .route("/api/users/{id}/role", put(update_role))
        .with_state(state)
}

/// Mock users, keyed by email. Every role shape the portal gates on.
fn mock_user(email: &str) -> User {
    let (first, role, organization) = match email {
        "admin@openrad.io" => ("Ada", Some("SUPER_ADMIN"), None),
        "orgadmin@clinic.org" => ("Olive", Some("ORG_ADMIN"), Some("acme-health")),
        "orgless@clinic.org" => ("Orphan", Some("ORG_ADMIN"), None),
        _ => ("Grace", Some("MEMBER"), Some("acme-health")),
    };
    serde_json::from_value(json!({
        "id": format!("u-{first}"),
        "email": email,
        "firstName": first,
        "lastName": "Tester",
        "role": role,
        "organization": organization,
    }))
    .expect("mock user deserializes")
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    state.record("POST", "/auth/login", &headers);

    if form.password != TEST_PASSWORD {
        return (StatusCode::UNAUTHORIZED, "invalid credentials").into_response();
    }

    Json(json!({
        "access_token": format!("token-for-{}", form.username),
        "token_type": "bearer",
        "user": mock_user(&form.username),
    }))
    .into_response()
}

fn sample_patient() -> Patient {
    serde_json::from_value(json!({
        "id": "p-1",
        "mrn": "MRN-0042",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "organization": "acme-health",
    }))
    .expect("mock patient deserializes")
}

async fn patients(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Json<Paged<Patient>> {
    state.record("GET", "/api/patients", &headers);
    Json(Paged::ok(vec![sample_patient()], 1, 10, 1))
}

async fn users(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Json<Paged<User>> {
    state.record("GET", "/api/users", &headers);
    Json(Paged::ok(vec![mock_user("doc@clinic.org")], 1, 10, 1))
}

async fn user(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Json<Envelope<User>> {
    state.record("GET", &format!("/api/users/{id}"), &headers);
    Json(Envelope::ok(mock_user("doc@clinic.org")))
}

fn sample_organization() -> Organization {
    serde_json::from_value(json!({
        "id": "org-1",
        "name": "acme-health",
        "displayName": "Acme Health",
        "dicomUrl": "https://pacs.acme.test/dicomweb",
    }))
    .expect("mock organization deserializes")
}

async fn organization(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    state.record("GET", &format!("/api/organizations/{id}"), &headers);

    match id.as_str() {
        "missing" => (
            StatusCode::BAD_REQUEST,
            Json(Envelope::<Organization>::err("not found")),
        )
            .into_response(),
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "backend exploded").into_response(),
        _ => Json(Envelope::ok(sample_organization())).into_response(),
    }
}

async fn search_organizations(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(query): Path<String>,
) -> Json<Paged<OrgShortDetails>> {
    state.record("GET", "/api/organizations/search", &headers);
    if let Ok(mut terms) = state.search_terms.lock() {
        terms.push(query.clone());
    }

    let hit: OrgShortDetails = serde_json::from_value(json!({
        "id": "org-1",
        "name": query,
        "displayName": "Acme Health",
    }))
    .expect("mock org details deserialize");
    Json(Paged::ok(vec![hit], 1, 10, 1))
}

async fn study_series(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Json<Envelope<Vec<Series>>> {
    state.record("GET", "/api/studies/series", &headers);

    let status = state
        .series_status
        .lock()
        .map(|s| *s)
        .unwrap_or_default();
    let series: Series = serde_json::from_value(json!({
        "id": "se-1",
        "studyInstanceUid": id,
        "seriesInstanceUid": "1.2.3.4",
        "seriesNumber": 1,
        "modality": "CT",
        "instancesCount": 120,
        "predictionStatus": status,
    }))
    .expect("mock series deserializes");
    Json(Envelope::ok(vec![series]))
}

async fn predict_series(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> Json<Envelope<()>> {
    state.record("POST", "/api/studies/series/predict", &headers);
    if let Ok(mut status) = state.series_status.lock() {
        *status = PredictionStatus::InProgress;
    }
    Json(Envelope::ok_empty())
}

async fn update_role(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Json<Envelope<()>> {
    state.record("PUT", &format!("/api/users/{id}/role"), &headers);
    Json(Envelope::ok_empty())
}

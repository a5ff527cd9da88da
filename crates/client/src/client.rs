//! The gateway to the backend REST API.
//!
//! One `ApiClient` is built at startup and injected wherever backend access
//! is needed; it holds no mutable state beyond configuration. Every call
//! resolves the session through the injected [`SessionProvider`], attaches
//! the bearer header, and normalizes the response:
//!
//! - 2xx and policy-listed domain statuses (default: exactly 400) parse as
//!   the `{success, data, error}` envelope;
//! - anything else raises [`ApiError::Status`] to the caller's error
//!   boundary.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SessionProvider;

/// Statuses treated as domain failures unless the policy is overridden.
///
/// HTTP 400 means the backend processed a well-formed request and rejected
/// its content; the body carries a user-facing envelope. Whether other 4xx
/// statuses also do is a backend-contract question, so the list is
/// configurable per client rather than hard-coded.
const DEFAULT_DOMAIN_STATUSES: &[u16] = &[400];

/// Client for the backend REST API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    /// REST API root, `{backend_url}/api`.
    api_base: String,
    /// Backend root, used only for the credential exchange.
    backend_base: String,
    sessions: Arc<dyn SessionProvider>,
    domain_statuses: Vec<u16>,
}

impl ApiClient {
    /// Create a new API client.
    #[must_use]
    pub fn new(config: &ClientConfig, sessions: Arc<dyn SessionProvider>) -> Self {
        Self::with_domain_statuses(config, sessions, DEFAULT_DOMAIN_STATUSES)
    }

    /// Create a client with a non-default domain-status policy.
    #[must_use]
    pub fn with_domain_statuses(
        config: &ClientConfig,
        sessions: Arc<dyn SessionProvider>,
        domain_statuses: &[u16],
    ) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                http: reqwest::Client::new(),
                api_base: config.api_base(),
                backend_base: config.backend_url.clone(),
                sessions,
                domain_statuses: domain_statuses.to_vec(),
            }),
        }
    }

    /// A client sharing this one's configuration and connection pool but
    /// scoped to the given session source.
    ///
    /// The portal uses this to hand each request a client carrying that
    /// request's resolved session.
    #[must_use]
    pub fn scoped(&self, sessions: Arc<dyn SessionProvider>) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                http: self.inner.http.clone(),
                api_base: self.inner.api_base.clone(),
                backend_base: self.inner.backend_base.clone(),
                sessions,
                domain_statuses: self.inner.domain_statuses.clone(),
            }),
        }
    }

    /// Backend root URL, without the `/api` prefix.
    #[must_use]
    pub(crate) fn backend_base(&self) -> &str {
        &self.inner.backend_base
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Send a GET request to the backend API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a status outside the
    /// domain policy, or an unparseable body.
    #[instrument(skip(self))]
    pub(crate) async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let request = self
            .inner
            .http
            .get(format!("{}{endpoint}", self.inner.api_base));
        let response = self.authorize(request).send().await?;
        self.read(response).await
    }

    /// Send a POST request with a JSON body to the backend API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a status outside the
    /// domain policy, or an unparseable body.
    #[instrument(skip(self, body))]
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self
            .inner
            .http
            .post(format!("{}{endpoint}", self.inner.api_base))
            .json(body);
        let response = self.authorize(request).send().await?;
        self.read(response).await
    }

    /// Send a PUT request with a JSON body to the backend API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a status outside the
    /// domain policy, or an unparseable body.
    #[instrument(skip(self, body))]
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self
            .inner
            .http
            .put(format!("{}{endpoint}", self.inner.api_base))
            .json(body);
        let response = self.authorize(request).send().await?;
        self.read(response).await
    }

    /// Send a DELETE request to the backend API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a status outside the
    /// domain policy, or an unparseable body.
    #[instrument(skip(self))]
    pub(crate) async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let request = self
            .inner
            .http
            .delete(format!("{}{endpoint}", self.inner.api_base));
        let response = self.authorize(request).send().await?;
        self.read(response).await
    }

    /// Attach the bearer header when a session exists.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.inner.sessions.session() {
            Some(session) => request.bearer_auth(&session.access_token),
            None => request,
        }
    }

    /// Normalize the response per the status policy.
    async fn read<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let is_domain = self.inner.domain_statuses.contains(&status.as_u16());

        if !status.is_success() && !is_domain {
            let status_text = status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                status_text,
                body,
            });
        }

        if is_domain {
            debug!(status = %status, "treating response as domain failure envelope");
        }

        // Read the body as text first for better parse-error diagnostics
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::RequestSession;

    fn test_config() -> ClientConfig {
        ClientConfig {
            backend_url: "https://backend.openrad.test".to_string(),
            viewer_url: "https://viewer.openrad.test".to_string(),
            ipinfo_token: secrecy::SecretString::from("token"),
        }
    }

    #[test]
    fn test_default_policy_is_exactly_400() {
        let client = ApiClient::new(&test_config(), Arc::new(RequestSession::anonymous()));
        assert_eq!(client.inner.domain_statuses, vec![400]);
    }

    #[test]
    fn test_scoped_client_keeps_policy() {
        let client = ApiClient::with_domain_statuses(
            &test_config(),
            Arc::new(RequestSession::anonymous()),
            &[400, 422],
        );
        let scoped = client.scoped(Arc::new(RequestSession::anonymous()));
        assert_eq!(scoped.inner.domain_statuses, vec![400, 422]);
        assert_eq!(scoped.inner.api_base, "https://backend.openrad.test/api");
    }
}

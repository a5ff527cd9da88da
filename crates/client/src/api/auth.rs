//! Credential exchange with the backend auth endpoint.

use tracing::warn;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::session::{Session, SignInResult};

/// Statuses meaning "credentials rejected" rather than "backend broken".
const REJECTED_STATUSES: &[u16] = &[400, 401, 403];

impl ApiClient {
    /// Exchange credentials for a session.
    ///
    /// Posts form-encoded `username`/`password` to `/auth/login` (at the
    /// backend root, not under `/api`). Rejected credentials yield
    /// `Ok(None)` - only backend or transport problems are errors.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or an unexpected status.
    pub async fn sign_in(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Session>, ApiError> {
        let response = self
            .http()
            .post(format!("{}/auth/login", self.backend_base()))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let status = response.status();

        if REJECTED_STATUSES.contains(&status.as_u16()) {
            warn!(status = %status, "credential exchange rejected");
            return Ok(None);
        }

        if !status.is_success() {
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

        let result: SignInResult = serde_json::from_str(&response.text().await?)?;
        Ok(Some(Session::from_sign_in(result.user, result.access_token)))
    }
}

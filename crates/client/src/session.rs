//! Session model and the pluggable session source.
//!
//! A session is derived once from the backend's credential exchange and is
//! read-only afterwards: this layer only forwards its access token as a
//! bearer header. Role or organization changes take effect at the next
//! sign-in, never by mutating a live session.

use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use openrad_core::{User, UserId, UserRole};

/// How long a session stays valid after sign-in.
pub const SESSION_TTL_HOURS: i64 = 24;

/// The signed-in caller, as carried inside a [`Session`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, deserialize_with = "UserRole::deserialize_lenient")]
    pub role: Option<UserRole>,
    /// Name of the organization the user belongs to, if any.
    pub organization: Option<String>,
}

impl SessionUser {
    /// Full display name.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// An authenticated session bound to a backend access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: SessionUser,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from the credential-exchange response, valid for
    /// [`SESSION_TTL_HOURS`] from now.
    #[must_use]
    pub fn from_sign_in(user: User, access_token: String) -> Self {
        Self {
            user: SessionUser {
                id: user.id,
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
                role: user.role,
                organization: user.organization,
            },
            access_token,
            expires_at: Utc::now() + Duration::hours(SESSION_TTL_HOURS),
        }
    }

    /// Whether the session's token lifetime has elapsed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Wire shape of a successful `POST /auth/login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInResult {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

/// Source of the current session for the API client.
///
/// The client never resolves sessions itself - the hosting environment
/// injects the strategy at construction time: request-scoped on the server
/// path, shared-cache-scoped on the client path.
pub trait SessionProvider: Send + Sync {
    /// The current session, if any. Expired sessions are treated as absent.
    fn session(&self) -> Option<Session>;
}

/// Request-scoped provider: holds the single session resolved for one
/// request and never changes.
#[derive(Debug, Clone, Default)]
pub struct RequestSession(Option<Session>);

impl RequestSession {
    /// Provider for an authenticated request.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(Some(session))
    }

    /// Provider for an unauthenticated request.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self(None)
    }
}

impl SessionProvider for RequestSession {
    fn session(&self) -> Option<Session> {
        self.0.clone().filter(|s| !s.is_expired())
    }
}

/// Shared-cache provider: one session slot shared by every component in the
/// process, updated only by sign-in and sign-out.
#[derive(Debug, Default)]
pub struct SharedSession {
    slot: RwLock<Option<Session>>,
}

impl SharedSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the session produced by a successful sign-in.
    pub fn set(&self, session: Session) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(session);
        }
    }

    /// Drop the session on sign-out.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }
}

impl SessionProvider for SharedSession {
    fn session(&self) -> Option<Session> {
        self.slot
            .read()
            .ok()
            .and_then(|slot| slot.clone())
            .filter(|s| !s.is_expired())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_user() -> User {
        serde_json::from_str(
            r#"{
                "id": "u-1",
                "email": "doc@clinic.org",
                "firstName": "Grace",
                "lastName": "Hopper",
                "role": "ORG_ADMIN",
                "organization": "acme-health"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_session_from_sign_in() {
        let session = Session::from_sign_in(test_user(), "tok".to_string());
        assert_eq!(session.user.display_name(), "Grace Hopper");
        assert_eq!(session.user.role, Some(UserRole::OrgAdmin));
        assert!(!session.is_expired());
    }

    #[test]
    fn test_expired_session_is_absent() {
        let mut session = Session::from_sign_in(test_user(), "tok".to_string());
        session.expires_at = Utc::now() - Duration::minutes(1);

        let provider = RequestSession::new(session.clone());
        assert!(provider.session().is_none());

        let shared = SharedSession::new();
        shared.set(session);
        assert!(shared.session().is_none());
    }

    #[test]
    fn test_shared_session_set_and_clear() {
        let shared = SharedSession::new();
        assert!(shared.session().is_none());

        shared.set(Session::from_sign_in(test_user(), "tok".to_string()));
        assert!(shared.session().is_some());

        shared.clear();
        assert!(shared.session().is_none());
    }

    #[test]
    fn test_anonymous_request_session() {
        assert!(RequestSession::anonymous().session().is_none());
    }
}

//! Authentication extractors for role-gated routes.
//!
//! Every protected handler declares its requirement as an extractor, so the
//! auth decision runs at request-routing time - before any backend fetch.
//! An absent or expired session redirects to the sign-in entry point for
//! page requests and answers 401 for `/api/` requests.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session as CookieSession;

use openrad_client::Session;
use openrad_core::UserRole;

use crate::models::session_keys;

/// Extractor that requires a signed-in, unexpired session.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(session): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", session.user.display_name())
/// }
/// ```
pub struct RequireAuth(pub Session);

/// Error returned when authentication is required but absent.
pub enum AuthRejection {
    /// Redirect to sign-in (for page requests).
    RedirectToSignIn,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToSignIn => Redirect::to("/auth/signin").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

/// Read the stored session from the cookie session, dropping expired ones.
async fn resolve_session(parts: &Parts) -> Option<Session> {
    let cookies = parts.extensions.get::<CookieSession>()?;
    cookies
        .get::<Session>(session_keys::CURRENT_SESSION)
        .await
        .ok()
        .flatten()
        .filter(|session| !session.is_expired())
}

/// Rejection matching the request flavor: API calls get a status, page
/// loads get the sign-in redirect.
fn unauthenticated(parts: &Parts) -> AuthRejection {
    if parts.uri.path().starts_with("/api/") {
        AuthRejection::Unauthorized
    } else {
        AuthRejection::RedirectToSignIn
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = resolve_session(parts)
            .await
            .ok_or_else(|| unauthenticated(parts))?;
        Ok(Self(session))
    }
}

/// Extractor that optionally gets the current session.
///
/// Unlike `RequireAuth`, this does not reject unauthenticated requests.
pub struct OptionalAuth(pub Option<Session>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve_session(parts).await))
    }
}

/// Extractor that requires app-admin capability (`SUPER_ADMIN` or
/// `APP_ADMIN`).
pub struct RequireAppAdmin(pub Session);

/// Error returned when a capability check fails.
pub enum CapabilityRejection {
    /// Redirect to sign-in (for page requests).
    RedirectToSignIn,
    /// Unauthorized response (for API requests).
    Unauthorized,
    /// Authenticated but lacking the capability.
    Forbidden(&'static str),
}

impl IntoResponse for CapabilityRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToSignIn => Redirect::to("/auth/signin").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Forbidden(message) => (StatusCode::FORBIDDEN, message).into_response(),
        }
    }
}

impl From<AuthRejection> for CapabilityRejection {
    fn from(rejection: AuthRejection) -> Self {
        match rejection {
            AuthRejection::RedirectToSignIn => Self::RedirectToSignIn,
            AuthRejection::Unauthorized => Self::Unauthorized,
        }
    }
}

impl<S> FromRequestParts<S> for RequireAppAdmin
where
    S: Send + Sync,
{
    type Rejection = CapabilityRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(session) = RequireAuth::from_request_parts(parts, state).await?;

        if !UserRole::grants_app_admin(session.user.role) {
            return Err(CapabilityRejection::Forbidden(
                "Only application admins can access this resource",
            ));
        }

        Ok(Self(session))
    }
}

/// Extractor that requires organization-admin capability plus an
/// organization on the session.
///
/// An `ORG_ADMIN` session without an organization is an inconsistent state;
/// it gets "no access", not a crash.
pub struct RequireOrgAdmin {
    pub session: Session,
    /// Name of the organization the caller administers.
    pub organization: String,
}

impl<S> FromRequestParts<S> for RequireOrgAdmin
where
    S: Send + Sync,
{
    type Rejection = CapabilityRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(session) = RequireAuth::from_request_parts(parts, state).await?;

        if !UserRole::grants_org_admin(session.user.role) {
            return Err(CapabilityRejection::Forbidden(
                "Only organization admins can access this resource",
            ));
        }

        let Some(organization) = session.user.organization.clone() else {
            return Err(CapabilityRejection::Forbidden(
                "No organization is associated with this account",
            ));
        };

        Ok(Self {
            session,
            organization,
        })
    }
}

/// Helper to store the session after a successful credential exchange.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_session(
    cookies: &CookieSession,
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    cookies
        .insert(session_keys::CURRENT_SESSION, session)
        .await
}

/// Helper to destroy the session on sign-out.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_session(
    cookies: &CookieSession,
) -> Result<(), tower_sessions::session::Error> {
    cookies.flush().await
}

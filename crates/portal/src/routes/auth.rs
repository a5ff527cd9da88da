//! Sign-in and sign-out handlers.
//!
//! Sign-in exchanges credentials with the backend and stores the resulting
//! session in the cookie session. Everything else about token issuance
//! belongs to the backend.

use axum::{Form, Json, extract::State, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session as CookieSession;
use tracing::instrument;

use openrad_client::SessionUser;
use openrad_client::ipinfo::IpInfo;
use openrad_core::{Envelope, RegisterUser, RequestPasswordRecovery, ResetPassword};

use crate::error::Result;
use crate::middleware::auth::{clear_current_session, set_current_session};
use crate::state::AppState;

/// Credential form posted by the sign-in page.
#[derive(Debug, Deserialize)]
pub struct SignInForm {
    pub username: String,
    pub password: String,
}

/// Exchange credentials for a session.
///
/// Rejected credentials are a domain failure rendered next to the form,
/// not an error page.
#[instrument(skip_all, fields(username = %form.username))]
pub async fn sign_in(
    State(state): State<AppState>,
    cookies: CookieSession,
    Form(form): Form<SignInForm>,
) -> Result<Json<Envelope<SessionUser>>> {
    match state.api().sign_in(&form.username, &form.password).await? {
        Some(session) => {
            set_current_session(&cookies, &session).await?;
            tracing::info!(user_id = %session.user.id, "sign-in succeeded");
            Ok(Json(Envelope::ok(session.user)))
        }
        None => Ok(Json(Envelope::err("Invalid email or password"))),
    }
}

/// Destroy the session and return to the sign-in entry point.
pub async fn sign_out(cookies: CookieSession) -> Result<Redirect> {
    clear_current_session(&cookies).await?;
    Ok(Redirect::to("/auth/signin"))
}

/// Complete a registration from an invitation token. Unauthenticated by
/// design; the token carries the authorization.
pub async fn register(
    State(state): State<AppState>,
    Json(command): Json<RegisterUser>,
) -> Result<Json<Envelope<()>>> {
    Ok(Json(state.api().register_user(&command).await?))
}

/// Start the password-recovery flow.
pub async fn password_recovery(
    State(state): State<AppState>,
    Json(command): Json<RequestPasswordRecovery>,
) -> Result<Json<Envelope<()>>> {
    Ok(Json(state.api().request_password_recovery(&command).await?))
}

/// Complete the password-recovery flow with a mailed token.
pub async fn password_reset(
    State(state): State<AppState>,
    Json(command): Json<ResetPassword>,
) -> Result<Json<Envelope<()>>> {
    Ok(Json(state.api().reset_password(&command).await?))
}

/// Locale defaults for the sign-up form, looked up from the caller's IP.
///
/// A failed lookup degrades to a domain failure; sign-up proceeds without
/// pre-filled country and timezone.
pub async fn locale_info(State(state): State<AppState>) -> Json<Envelope<IpInfo>> {
    match state.ipinfo().lookup().await {
        Ok(info) => Json(Envelope::ok(info)),
        Err(error) => {
            tracing::warn!(%error, "IP-info lookup failed");
            Json(Envelope::err("Could not determine locale defaults"))
        }
    }
}

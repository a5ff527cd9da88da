//! The calling user's own profile.
//!
//! All writes are forced onto the session's user ID - the body can never
//! address somebody else's account.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use openrad_core::{Envelope, Report, ReportId, UpdatePassword, UpdateProfile, User};

use crate::error::Result;
use crate::middleware::auth::RequireAuth;
use crate::state::AppState;

/// The caller's user record.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
) -> Result<Json<Envelope<User>>> {
    let user_id = session.user.id.clone();
    let api = state.api_for(session);
    Ok(Json(api.get_user(&user_id).await?))
}

/// Profile fields the caller may change.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile_phone: Option<String>,
    pub work_phone: Option<String>,
    pub country: Option<String>,
    pub timezone: Option<String>,
}

/// Update the caller's profile.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    Json(request): Json<ProfileUpdateRequest>,
) -> Result<Json<Envelope<()>>> {
    let command = UpdateProfile {
        user_id: session.user.id.clone(),
        first_name: request.first_name,
        last_name: request.last_name,
        mobile_phone: request.mobile_phone,
        work_phone: request.work_phone,
        country: request.country,
        timezone: request.timezone,
    };
    let api = state.api_for(session);
    Ok(Json(api.update_profile(&command).await?))
}

/// Password change request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordUpdateRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Change the caller's password.
pub async fn password(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    Json(request): Json<PasswordUpdateRequest>,
) -> Result<Json<Envelope<()>>> {
    let command = UpdatePassword {
        user_id: session.user.id.clone(),
        current_password: request.current_password,
        new_password: request.new_password,
    };
    let api = state.api_for(session);
    Ok(Json(api.update_password(&command).await?))
}

/// The caller's bookmarked reports.
pub async fn bookmarked_reports(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
) -> Result<Json<Envelope<Vec<Report>>>> {
    let user_id = session.user.id.clone();
    let api = state.api_for(session);
    Ok(Json(api.get_user_bookmarked_reports(&user_id).await?))
}

/// Whether the caller has bookmarked the given report.
pub async fn has_bookmarked(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    Path(id): Path<ReportId>,
) -> Result<Json<Envelope<bool>>> {
    let user_id = session.user.id.clone();
    let api = state.api_for(session);
    Ok(Json(api.has_user_bookmarked_report(&user_id, &id).await?))
}

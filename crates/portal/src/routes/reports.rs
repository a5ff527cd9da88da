//! Report reading, editing, and bookmarking.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use openrad_core::{BookmarkReport, Envelope, Report, ReportId, UpdateReport};

use crate::error::Result;
use crate::middleware::auth::RequireAuth;
use crate::state::AppState;

/// Report by ID.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    Path(id): Path<ReportId>,
) -> Result<Json<Envelope<Report>>> {
    let api = state.api_for(session);
    Ok(Json(api.get_report(&id).await?))
}

/// Update a report's narrative sections and findings.
///
/// The path owns the identity; whatever ID the body carries is replaced.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    Path(id): Path<ReportId>,
    Json(mut command): Json<UpdateReport>,
) -> Result<Json<Envelope<()>>> {
    command.id = id;
    let api = state.api_for(session);
    Ok(Json(api.update_report(&command).await?))
}

/// Bookmark request; the user is the caller, never a body field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRequest {
    pub report_id: ReportId,
}

/// Bookmark a report for the calling user.
pub async fn bookmark(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    Json(request): Json<BookmarkRequest>,
) -> Result<Json<Envelope<()>>> {
    let command = BookmarkReport {
        user_id: session.user.id.clone(),
        report_id: request.report_id,
    };
    let api = state.api_for(session);
    Ok(Json(api.bookmark_report(&command).await?))
}

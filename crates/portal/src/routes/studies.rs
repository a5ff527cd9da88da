//! Study browsing and AI-prediction triggering.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use openrad_core::{Envelope, PatientId, PredictSeries, Series, Study, StudyInstanceUid};

use super::OrgScope;
use crate::error::Result;
use crate::middleware::auth::RequireAuth;
use crate::state::AppState;

/// Query for the study listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudiesParams {
    pub patient_id: PatientId,
    pub organization: String,
}

/// Studies for a patient, straight from the organization's DICOM server.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    Query(params): Query<StudiesParams>,
) -> Result<Json<Envelope<Vec<Study>>>> {
    let api = state.api_for(session);
    Ok(Json(
        api.get_studies(&params.patient_id, &params.organization)
            .await?,
    ))
}

/// Series of a study, including prediction state per row.
///
/// While any returned row reports `in_progress`, the grid re-requests this
/// endpoint on its 10-second poll.
pub async fn series(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    Path(id): Path<StudyInstanceUid>,
    Query(scope): Query<OrgScope>,
) -> Result<Json<Envelope<Vec<Series>>>> {
    let api = state.api_for(session);
    Ok(Json(api.get_study_series(&id, &scope.organization).await?))
}

/// Queue an AI prediction for a series.
#[instrument(skip_all, fields(series = %command.series_instance_uid))]
pub async fn predict(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    Json(command): Json<PredictSeries>,
) -> Result<Json<Envelope<()>>> {
    let api = state.api_for(session);
    Ok(Json(api.predict_series(&command).await?))
}

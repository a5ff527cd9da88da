//! Patient search and per-patient listings.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use openrad_core::{Document, Envelope, Paged, Patient, PatientId, Study};

use super::{ListParams, OrgScope};
use crate::error::Result;
use crate::middleware::auth::RequireAuth;
use crate::state::AppState;

/// Patient search, paginated.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    Query(params): Query<ListParams>,
) -> Result<Json<Paged<Patient>>> {
    let api = state.api_for(session);
    Ok(Json(api.get_patients(&params.search_query()).await?))
}

/// Patient by ID or MRN, scoped to an organization.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    Path(id): Path<PatientId>,
    Query(scope): Query<OrgScope>,
) -> Result<Json<Envelope<Patient>>> {
    let api = state.api_for(session);
    Ok(Json(api.get_patient(&id, &scope.organization).await?))
}

/// A patient's studies, paginated.
pub async fn studies(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    Path(id): Path<PatientId>,
    Query(params): Query<ListParams>,
) -> Result<Json<Paged<Study>>> {
    let api = state.api_for(session);
    Ok(Json(api.get_patient_studies(&id, &params.page_query()).await?))
}

/// A patient's documents, paginated.
pub async fn documents(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    Path(id): Path<PatientId>,
    Query(params): Query<ListParams>,
) -> Result<Json<Paged<Document>>> {
    let api = state.api_for(session);
    Ok(Json(
        api.get_patient_documents(&id, &params.page_query()).await?,
    ))
}

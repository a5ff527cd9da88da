//! External viewer integration: mode selection and embed URLs.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use openrad_core::{
    DicomWebConfig, Envelope, SeriesInstanceUid, StudyInstanceUid, ViewerMode,
};

use crate::error::Result;
use crate::middleware::auth::RequireAuth;
use crate::state::AppState;

/// Query for the mode listing.
#[derive(Debug, Deserialize)]
pub struct ModesParams {
    /// Space-separated modality codes, e.g. `"PT CT"`.
    pub modalities: String,
}

/// A selectable viewer mode with its picker label.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeOption {
    pub mode: ViewerMode,
    pub label: &'static str,
}

/// The viewer modes a study's modalities support.
pub async fn modes(
    RequireAuth(_session): RequireAuth,
    Query(params): Query<ModesParams>,
) -> Json<Vec<ModeOption>> {
    let options = ViewerMode::available_for(&params.modalities)
        .into_iter()
        .map(|mode| ModeOption {
            mode,
            label: mode.label(),
        })
        .collect();
    Json(options)
}

/// Query for the embed URL.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedParams {
    /// Organization whose PACS serves the study.
    pub organization: String,
    pub mode: Option<ViewerMode>,
    pub study_instance_uid: Option<StudyInstanceUid>,
    pub series_instance_uid: Option<SeriesInstanceUid>,
}

/// The embed URL handed to the viewer iframe.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerEmbed {
    pub mode: ViewerMode,
    pub url: String,
}

/// Build the viewer URL for a study or series.
///
/// The organization lookup resolves the DICOM URL; an organization without
/// one is a domain failure, not a broken link.
pub async fn embed_url(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    Query(params): Query<EmbedParams>,
) -> Result<Json<Envelope<ViewerEmbed>>> {
    let api = state.api_for(session);
    let lookup = state.organization(&api, &params.organization).await?;

    let Some(organization) = lookup.data else {
        let message = lookup
            .error
            .unwrap_or_else(|| "Organization not found".to_string());
        return Ok(Json(Envelope::err(message)));
    };

    let mode = params.mode.unwrap_or(ViewerMode::Viewer);
    let url = state.viewer().build(
        mode,
        &organization.dicom_url,
        params.study_instance_uid.as_ref(),
        params.series_instance_uid.as_ref(),
    )?;

    Ok(Json(Envelope::ok(ViewerEmbed {
        mode,
        url: url.into(),
    })))
}

/// DICOMWeb data-source block for an organization, passed through to the
/// embedded viewer configuration.
pub async fn dicomweb(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Envelope<DicomWebConfig>>> {
    let api = state.api_for(session);
    Ok(Json(api.get_org_dicomweb(&id).await?))
}

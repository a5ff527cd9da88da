//! The caller's own organization (org-admin capability).
//!
//! Every operation here is scoped to the organization on the caller's
//! session; the body can never address another organization.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use openrad_client::api::UserSearch;
use openrad_core::{
    Email, Envelope, InviteToOrg, JoinOrganization, Organization, Paged, UpdateOrganization,
    User, UserRole,
};

use super::ListParams;
use crate::error::Result;
use crate::middleware::auth::{RequireAuth, RequireOrgAdmin};
use crate::state::AppState;

/// The caller's organization, via the shared cache.
pub async fn show(
    State(state): State<AppState>,
    admin: RequireOrgAdmin,
) -> Result<Json<Envelope<Organization>>> {
    let organization = admin.organization;
    let api = state.api_for(admin.session);
    Ok(Json(state.organization(&api, &organization).await?))
}

/// Fields an org admin may change on their own organization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgUpdateRequest {
    pub display_name: Option<String>,
    pub dicom_url: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Update the caller's organization.
pub async fn update(
    State(state): State<AppState>,
    admin: RequireOrgAdmin,
    Json(request): Json<OrgUpdateRequest>,
) -> Result<Json<Envelope<()>>> {
    let organization = admin.organization;
    let api = state.api_for(admin.session);

    // The organization's own admin addresses it by name; renaming is an
    // app-admin operation.
    let command = UpdateOrganization {
        id: organization.as_str().into(),
        name: None,
        display_name: request.display_name,
        dicom_url: request.dicom_url,
        website: request.website,
        email: request.email,
        address: request.address,
    };
    let result = api.update_organization(&command).await?;

    if result.is_ok() {
        state.invalidate_organization(&organization).await;
    }

    Ok(Json(result))
}

/// Member listing for the caller's organization.
pub async fn members(
    State(state): State<AppState>,
    admin: RequireOrgAdmin,
    Query(params): Query<ListParams>,
) -> Result<Json<Paged<User>>> {
    let search = UserSearch {
        query: params.search_query(),
        organization_name: Some(admin.organization),
        organization_id: None,
    };
    let api = state.api_for(admin.session);
    Ok(Json(api.get_users(&search).await?))
}

/// Member invitation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInviteRequest {
    pub email: Email,
    pub role: Option<UserRole>,
}

/// Invite a member into the caller's organization.
#[instrument(skip_all, fields(email = %request.email))]
pub async fn invite(
    State(state): State<AppState>,
    admin: RequireOrgAdmin,
    Json(request): Json<MemberInviteRequest>,
) -> Result<Json<Envelope<()>>> {
    let command = InviteToOrg {
        email: request.email,
        organization: admin.organization,
        role: request.role,
    };
    let api = state.api_for(admin.session);
    Ok(Json(api.invite_to_organization(&command).await?))
}

/// Redeem an organization invitation token.
///
/// Any signed-in user can join; the token decides which organization.
pub async fn join(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    Json(command): Json<JoinOrganization>,
) -> Result<Json<Envelope<()>>> {
    let api = state.api_for(session);
    Ok(Json(api.join_organization(&command).await?))
}

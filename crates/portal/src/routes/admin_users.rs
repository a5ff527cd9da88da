//! User administration (app-admin capability).

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use openrad_client::api::UserSearch;
use openrad_core::{
    Envelope, InviteUser, Paged, UpdateUserOrg, UpdateUserRole, User, UserId, UserRole,
    UserShortDetails,
};

use crate::error::Result;
use crate::middleware::auth::RequireAppAdmin;
use crate::state::AppState;

/// User listing parameters: paging, free text, organization filters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    #[serde(default)]
    pub page: u32,
    pub page_size: Option<u32>,
    pub order_by: Option<String>,
    pub search: Option<String>,
    pub organization_name: Option<String>,
    pub organization_id: Option<String>,
}

impl UserListParams {
    fn to_user_search(&self) -> UserSearch {
        let list = super::ListParams {
            page: self.page,
            page_size: self.page_size,
            order_by: self.order_by.clone(),
            search: self.search.clone(),
        };
        UserSearch {
            query: list.search_query(),
            organization_name: self.organization_name.clone(),
            organization_id: self.organization_id.clone(),
        }
    }
}

/// User listing, paginated and filterable.
pub async fn index(
    State(state): State<AppState>,
    RequireAppAdmin(session): RequireAppAdmin,
    Query(params): Query<UserListParams>,
) -> Result<Json<Paged<User>>> {
    let api = state.api_for(session);
    Ok(Json(api.get_users(&params.to_user_search()).await?))
}

/// User autocomplete by free text.
pub async fn search(
    State(state): State<AppState>,
    RequireAppAdmin(session): RequireAppAdmin,
    Path(query): Path<String>,
    Query(params): Query<UserListParams>,
) -> Result<Json<Paged<UserShortDetails>>> {
    let mut user_search = params.to_user_search();
    user_search.query.search = query;
    let api = state.api_for(session);
    Ok(Json(api.search_users(&user_search).await?))
}

/// Invite a user by email.
#[instrument(skip_all, fields(email = %command.email))]
pub async fn invite(
    State(state): State<AppState>,
    RequireAppAdmin(session): RequireAppAdmin,
    Json(command): Json<InviteUser>,
) -> Result<Json<Envelope<()>>> {
    let api = state.api_for(session);
    Ok(Json(api.invite_user(&command).await?))
}

/// Role change request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleUpdateRequest {
    pub role: UserRole,
    pub organization: Option<String>,
}

/// Change a user's role.
///
/// Granting `ORG_ADMIN` without an organization would create exactly the
/// inconsistent session state the extractors have to defend against, so it
/// is rejected here as a domain failure.
pub async fn update_role(
    State(state): State<AppState>,
    RequireAppAdmin(session): RequireAppAdmin,
    Path(id): Path<UserId>,
    Json(request): Json<RoleUpdateRequest>,
) -> Result<Json<Envelope<()>>> {
    if request.role == UserRole::OrgAdmin && request.organization.is_none() {
        return Ok(Json(Envelope::err(
            "An organization is required for organization admins",
        )));
    }

    let command = UpdateUserRole {
        user_id: id,
        role: request.role,
        organization: request.organization,
    };
    let api = state.api_for(session);
    Ok(Json(api.update_user_role(&command).await?))
}

/// Organization move request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgUpdateRequest {
    pub organization: String,
}

/// Move a user into another organization.
pub async fn update_organization(
    State(state): State<AppState>,
    RequireAppAdmin(session): RequireAppAdmin,
    Path(id): Path<UserId>,
    Json(request): Json<OrgUpdateRequest>,
) -> Result<Json<Envelope<()>>> {
    let command = UpdateUserOrg {
        user_id: id,
        organization: request.organization,
    };
    let api = state.api_for(session);
    Ok(Json(api.update_user_organization(&command).await?))
}

//! Organization administration (app-admin capability).

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use openrad_core::{
    CreateOrganization, Envelope, OrgShortDetails, Organization, OrganizationId, Paged,
    SearchQuery, UpdateOrganization,
};

use super::ListParams;
use crate::error::Result;
use crate::middleware::auth::RequireAppAdmin;
use crate::state::AppState;

/// Organization listing, paginated and filterable.
pub async fn index(
    State(state): State<AppState>,
    RequireAppAdmin(session): RequireAppAdmin,
    Query(params): Query<ListParams>,
) -> Result<Json<Paged<Organization>>> {
    let api = state.api_for(session);
    Ok(Json(api.get_organizations(&params.search_query()).await?))
}

/// Organization autocomplete by free text.
pub async fn search(
    State(state): State<AppState>,
    RequireAppAdmin(session): RequireAppAdmin,
    Path(query): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Paged<OrgShortDetails>>> {
    let search = SearchQuery {
        page: params.page_query(),
        search: query,
    };
    let api = state.api_for(session);
    Ok(Json(api.search_organizations(&search).await?))
}

/// Create an organization.
#[instrument(skip_all, fields(name = %command.name))]
pub async fn create(
    State(state): State<AppState>,
    RequireAppAdmin(session): RequireAppAdmin,
    Json(command): Json<CreateOrganization>,
) -> Result<Json<Envelope<()>>> {
    let api = state.api_for(session);
    Ok(Json(api.create_organization(&command).await?))
}

/// Update an organization; the cached lookup becomes stale on success.
pub async fn update(
    State(state): State<AppState>,
    RequireAppAdmin(session): RequireAppAdmin,
    Path(id): Path<OrganizationId>,
    Json(mut command): Json<UpdateOrganization>,
) -> Result<Json<Envelope<()>>> {
    command.id = id;
    let api = state.api_for(session);
    let result = api.update_organization(&command).await?;

    if result.is_ok() {
        state.invalidate_organization(command.id.as_str()).await;
        // The cache is also keyed by name for name-addressed lookups
        if let Some(name) = &command.name {
            state.invalidate_organization(name).await;
        }
    }

    Ok(Json(result))
}

/// Delete an organization.
pub async fn delete(
    State(state): State<AppState>,
    RequireAppAdmin(session): RequireAppAdmin,
    Path(id): Path<OrganizationId>,
) -> Result<Json<Envelope<()>>> {
    let api = state.api_for(session);
    let result = api.delete_organization(&id).await?;

    if result.is_ok() {
        state.invalidate_organization(id.as_str()).await;
    }

    Ok(Json(result))
}

//! HTTP route handlers for the portal.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST /auth/signin            - Credential exchange, stores the session
//! POST /auth/signout           - Destroy the session
//! POST /auth/register          - Complete a registration from a token
//! POST /auth/password/recovery - Start password recovery
//! POST /auth/password/reset    - Complete password recovery
//! GET  /auth/locale-info       - Locale defaults for the sign-up form
//!
//! # Navigation
//! GET  /api/nav                - Role-gated navigation sections
//!
//! # Patients
//! GET  /api/patients                     - Patient search (paginated)
//! GET  /api/patients/{id}                - Patient by ID or MRN
//! GET  /api/patients/{id}/studies        - Patient's studies (paginated)
//! GET  /api/patients/{id}/documents      - Patient's documents (paginated)
//!
//! # Studies
//! GET  /api/studies                      - Studies from the DICOM server
//! GET  /api/studies/{id}/series          - Series of a study
//! POST /api/studies/series/predict       - Queue an AI prediction
//!
//! # Reports
//! GET  /api/reports/{id}                 - Report by ID
//! PUT  /api/reports/{id}                 - Update a report
//! POST /api/reports/bookmark             - Bookmark a report
//!
//! # Profile (requires auth)
//! GET  /api/profile                      - Own user record
//! PUT  /api/profile                      - Update own profile
//! PUT  /api/profile/password             - Change own password
//! GET  /api/profile/bookmarked-reports   - Own bookmarked reports
//! GET  /api/profile/bookmarked-reports/{id}/exists
//!
//! # Viewer
//! GET  /api/viewer/modes                 - Modes available for modalities
//! GET  /api/viewer/url                   - Embed URL for the external viewer
//! GET  /api/organizations/{id}/dicomweb  - DICOMWeb data-source block
//!
//! # Admin (requires app-admin capability)
//! GET  /api/admin/users                  - User listing
//! GET  /api/admin/users/search/{query}   - User autocomplete
//! POST /api/admin/users/invite           - Invite a user
//! PUT  /api/admin/users/{id}/role        - Change a user's role
//! PUT  /api/admin/users/{id}/organization - Move a user between orgs
//! GET  /api/admin/organizations          - Organization listing
//! GET  /api/admin/organizations/search/{query} - Organization autocomplete
//! POST /api/admin/organizations          - Create an organization
//! PUT  /api/admin/organizations/{id}     - Update an organization
//! DELETE /api/admin/organizations/{id}   - Delete an organization
//!
//! # Organization (requires org-admin capability)
//! GET  /api/organization                 - Own organization
//! PUT  /api/organization                 - Update own organization
//! GET  /api/organization/users           - Member listing
//! POST /api/organization/invite          - Invite a member
//! POST /api/organization/join            - Redeem an invitation token
//! ```

pub mod admin_organizations;
pub mod admin_users;
pub mod auth;
pub mod nav;
pub mod organization;
pub mod patients;
pub mod profile;
pub mod reports;
pub mod studies;
pub mod viewer;

use axum::{
    Router,
    routing::{get, post, put},
};
use serde::Deserialize;

use openrad_core::{PageQuery, SearchQuery};

use crate::state::AppState;

/// Paging and search parameters as the grids send them.
///
/// `page` is the grid's zero-based index; the codec shifts it to the
/// 1-indexed wire convention.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(default)]
    pub page: u32,
    pub page_size: Option<u32>,
    pub order_by: Option<String>,
    pub search: Option<String>,
}

impl ListParams {
    /// The zero-based page query these parameters describe.
    #[must_use]
    pub fn page_query(&self) -> PageQuery {
        let mut query = PageQuery::zero_based()
            .page(self.page)
            .page_size(self.page_size.unwrap_or(PageQuery::DEFAULT_PAGE_SIZE));
        if let Some(order_by) = &self.order_by {
            query = query.order_by(order_by.clone());
        }
        query
    }

    /// The searchable variant, with an empty search when none was sent.
    #[must_use]
    pub fn search_query(&self) -> SearchQuery {
        SearchQuery {
            page: self.page_query(),
            search: self.search.clone().unwrap_or_default(),
        }
    }
}

/// Organization scope parameter shared by DICOM-backed lookups.
#[derive(Debug, Clone, Deserialize)]
pub struct OrgScope {
    pub organization: String,
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signin", post(auth::sign_in))
        .route("/signout", post(auth::sign_out))
        .route("/register", post(auth::register))
        .route("/password/recovery", post(auth::password_recovery))
        .route("/password/reset", post(auth::password_reset))
        .route("/locale-info", get(auth::locale_info))
}

/// Create the admin routes router (app-admin capability enforced per
/// handler via `RequireAppAdmin`).
pub fn admin_routes() -> Router<AppState> {
    use axum::routing::delete;

    Router::new()
        .route("/users", get(admin_users::index))
        .route("/users/search/{query}", get(admin_users::search))
        .route("/users/invite", post(admin_users::invite))
        .route("/users/{id}/role", put(admin_users::update_role))
        .route(
            "/users/{id}/organization",
            put(admin_users::update_organization),
        )
        .route(
            "/organizations",
            get(admin_organizations::index).post(admin_organizations::create),
        )
        .route(
            "/organizations/search/{query}",
            get(admin_organizations::search),
        )
        .route(
            "/organizations/{id}",
            put(admin_organizations::update).delete(admin_organizations::delete),
        )
}

/// Create the organization-scoped routes router (org-admin capability
/// enforced per handler via `RequireOrgAdmin`).
pub fn organization_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(organization::show).put(organization::update),
        )
        .route("/users", get(organization::members))
        .route("/invite", post(organization::invite))
        .route("/join", post(organization::join))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/nav", get(nav::index))
        // Patients
        .route("/patients", get(patients::index))
        .route("/patients/{id}", get(patients::show))
        .route("/patients/{id}/studies", get(patients::studies))
        .route("/patients/{id}/documents", get(patients::documents))
        // Studies
        .route("/studies", get(studies::index))
        .route("/studies/{id}/series", get(studies::series))
        .route("/studies/series/predict", post(studies::predict))
        // Reports
        .route("/reports/{id}", get(reports::show).put(reports::update))
        .route("/reports/bookmark", post(reports::bookmark))
        // Profile
        .route("/profile", get(profile::show).put(profile::update))
        .route("/profile/password", put(profile::password))
        .route(
            "/profile/bookmarked-reports",
            get(profile::bookmarked_reports),
        )
        .route(
            "/profile/bookmarked-reports/{id}/exists",
            get(profile::has_bookmarked),
        )
        // Viewer
        .route("/viewer/modes", get(viewer::modes))
        .route("/viewer/url", get(viewer::embed_url))
        .route("/organizations/{id}/dicomweb", get(viewer::dicomweb))
        // Admin and organization management
        .nest("/admin", admin_routes())
        .nest("/organization", organization_routes())
}

/// Create all routes for the portal.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/api", api_routes())
}

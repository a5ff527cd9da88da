//! Role-gated navigation endpoint.

use axum::Json;

use crate::middleware::auth::OptionalAuth;
use crate::models::{NavSection, navigation_for};

/// The navigation sections the caller may see.
pub async fn index(OptionalAuth(session): OptionalAuth) -> Json<Vec<NavSection>> {
    Json(navigation_for(session.as_ref()))
}

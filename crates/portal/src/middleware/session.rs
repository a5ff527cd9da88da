//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. The session stores the
//! backend-issued token plus the signed-in user; nothing in it needs to
//! survive a portal restart, so no external store is involved.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use openrad_client::session::SESSION_TTL_HOURS;

use crate::config::PortalConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "openrad_session";

/// Create the session layer.
///
/// The cookie expiry matches the backend token lifetime; an expired cookie
/// and an expired token fail together.
#[must_use]
pub fn create_session_layer(config: &PortalConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::hours(SESSION_TTL_HOURS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

//! Session storage keys.
//!
//! The session value itself is [`openrad_client::Session`], produced by the
//! credential exchange and stored verbatim; the portal never mutates it.

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the signed-in session.
    pub const CURRENT_SESSION: &str = "current_session";
}

//! Middleware for the portal.

pub mod auth;
pub mod session;

pub use session::create_session_layer;

//! Typed operations on the backend REST API, one module per resource.
//!
//! Every method returns the `{success, data, error}` envelope (or its paged
//! variant) on the domain path and [`crate::ApiError`] on the transport
//! path. Command acknowledgements carry no payload and come back as
//! `Envelope<()>`.

pub mod auth;
pub mod organizations;
pub mod patients;
pub mod reports;
pub mod studies;
pub mod users;

pub use users::UserSearch;

/// Percent-encode a value used as a path segment.
pub(crate) fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

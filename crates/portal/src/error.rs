//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Domain failures never reach
//! this type - they travel inside the response envelope and render inline.
//! `AppError` is the error boundary for everything else: transport failures
//! toward the backend, broken sessions, and authorization rejections.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use openrad_client::ApiError;
use openrad_client::viewer::ViewerUrlError;

/// Application-level error type for the portal.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend API call failed at the transport level.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Backend API call failed behind a shared cache lookup; the error is
    /// shared between every caller coalesced into the failing request.
    #[error("API error: {0}")]
    ApiShared(#[from] std::sync::Arc<ApiError>),

    /// Viewer URL could not be built.
    #[error("Viewer error: {0}")]
    Viewer(#[from] ViewerUrlError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Caller is not authenticated.
    #[error("Unauthorized")]
    Unauthorized,

    /// Caller is authenticated but lacks the capability.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // A rejected token means the session outlived its backend validity;
        // recover by signing in again instead of showing an error page.
        let unauthorized = match &self {
            Self::Api(api) => api.is_unauthorized(),
            Self::ApiShared(api) => api.is_unauthorized(),
            _ => false,
        };
        if unauthorized {
            return Redirect::to("/auth/signin").into_response();
        }

        // Capture server-side failures to Sentry
        if matches!(self, Self::Api(_) | Self::ApiShared(_) | Self::Session(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Api(_) | Self::ApiShared(_) => StatusCode::BAD_GATEWAY,
            Self::Viewer(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose backend internals to clients
        let message = match &self {
            Self::Api(_) | Self::ApiShared(_) => "External service error".to_string(),
            Self::Session(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(status_of(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(AppError::Forbidden("nope".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::NotFound("report".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::BadRequest("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_transport_error_maps_to_bad_gateway() {
        let err = AppError::Api(ApiError::Status {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: String::new(),
        });
        assert_eq!(status_of(err), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_rejected_token_redirects_to_sign_in() {
        let err = AppError::Api(ApiError::Status {
            status: 401,
            status_text: "Unauthorized".to_string(),
            body: String::new(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").and_then(|v| v.to_str().ok()),
            Some("/auth/signin")
        );
    }
}

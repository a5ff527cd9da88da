//! Error type for backend API calls.
//!
//! Domain failures (HTTP 400 with a `{success:false}` body) are NOT errors
//! here - they parse into an `Envelope` and render inline. `ApiError` covers
//! everything that is not an expected domain outcome: connection problems,
//! unexpected statuses, unparseable bodies.

use thiserror::Error;

/// Errors raised by the API client for non-domain failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP request itself failed (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a status outside the domain-status policy.
    ///
    /// Carries the status text and raw body so the error boundary can log
    /// something actionable. No retry is attempted at this layer.
    #[error("API error: {status} {status_text}: {body}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The response claimed success but the body did not match the contract.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// The HTTP status for status errors, `None` otherwise.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(_) | Self::Parse(_) => None,
        }
    }

    /// Whether the failure indicates an expired or rejected token.
    ///
    /// The portal redirects to sign-in on these instead of showing an error
    /// page.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = ApiError::Status {
            status: 502,
            status_text: "Bad Gateway".to_string(),
            body: String::new(),
        };
        assert_eq!(err.status(), Some(502));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_unauthorized_detection() {
        let err = ApiError::Status {
            status: 401,
            status_text: "Unauthorized".to_string(),
            body: String::new(),
        };
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_display_carries_status_text_and_body() {
        let err = ApiError::Status {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "boom".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("500"));
        assert!(text.contains("Internal Server Error"));
        assert!(text.contains("boom"));
    }
}

//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `OPENRAD_BACKEND_URL` - Base URL of the backend REST API
//! - `OPENRAD_VIEWER_URL` - Base URL of the external OHIF viewer
//! - `OPENRAD_IPINFO_TOKEN` - API token for the ipinfo.io lookup
//!
//! All three are required; a missing variable fails startup with a
//! descriptive error instead of degrading silently at the first request.

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Connection targets for the backend API and external services.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, without the `/api` prefix.
    pub backend_url: String,
    /// Base URL of the external OHIF viewer.
    pub viewer_url: String,
    /// ipinfo.io API token.
    pub ipinfo_token: SecretString,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or not a
    /// valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            backend_url: get_url("OPENRAD_BACKEND_URL")?,
            viewer_url: get_url("OPENRAD_VIEWER_URL")?,
            ipinfo_token: SecretString::from(get_required_env("OPENRAD_IPINFO_TOKEN")?),
        })
    }

    /// The REST API root (`{backend_url}/api`).
    #[must_use]
    pub fn api_base(&self) -> String {
        format!("{}/api", self.backend_url)
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable and validate it parses as a URL.
///
/// A trailing slash is stripped so path concatenation stays predictable.
fn get_url(key: &str) -> Result<String, ConfigError> {
    let value = get_required_env(key)?;
    url::Url::parse(&value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Ok(value.trim_end_matches('/').to_string())
}

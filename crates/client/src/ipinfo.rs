//! IP geolocation client for sign-in locale defaults.
//!
//! The sign-up flow pre-fills country and timezone from the caller's IP via
//! ipinfo.io. The token is injected by configuration; its absence already
//! failed startup in [`crate::ClientConfig::from_env`].

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;

/// ipinfo.io base URL.
const BASE_URL: &str = "https://ipinfo.io";

/// Errors that can occur when looking up IP information.
#[derive(Debug, thiserror::Error)]
pub enum IpInfoError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The token could not be used as a header value.
    #[error("invalid ipinfo token")]
    InvalidToken,
}

/// Geolocation details for the caller's IP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpInfo {
    pub ip: String,
    pub hostname: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub loc: Option<String>,
    pub org: Option<String>,
    pub postal: Option<String>,
    pub timezone: Option<String>,
}

/// Client for the ipinfo.io lookup API.
#[derive(Clone)]
pub struct IpInfoClient {
    http: reqwest::Client,
}

impl IpInfoClient {
    /// Create a new IP-info client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the token is
    /// not a valid header value.
    pub fn new(config: &ClientConfig) -> Result<Self, IpInfoError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", config.ipinfo_token.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value).map_err(|_| IpInfoError::InvalidToken)?,
        );

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self { http })
    }

    /// Look up geolocation details for the calling address.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn lookup(&self) -> Result<IpInfo, IpInfoError> {
        let response = self.http.get(BASE_URL).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IpInfoError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

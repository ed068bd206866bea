//! Client configuration loaded via OrthoConfig.
//!
//! One knob matters: the API base URL, read from `ZIPLINK_API_BASE_URL` and
//! defaulting to the local development server when unset.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

/// Default API origin when no override is configured.
const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Default per-request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Configuration values for the ZipLink client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ZIPLINK")]
pub struct ClientSettings {
    /// Base URL (origin) of the ZipLink API server.
    pub api_base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[ortho_config(default = 30)]
    pub request_timeout_seconds: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
        }
    }
}

/// Errors raised while validating client configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The configured base URL does not parse.
    #[error("invalid API base URL '{value}': {message}")]
    InvalidBaseUrl {
        /// The rejected value.
        value: String,
        /// Parser-provided failure description.
        message: String,
    },
}

impl ClientSettings {
    /// Return the configured base URL, falling back to the default origin.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBaseUrl`] when the configured value
    /// does not parse as a URL.
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        Url::parse(raw).map_err(|error| SettingsError::InvalidBaseUrl {
            value: raw.to_owned(),
            message: error.to_string(),
        })
    }

    /// Return the configured request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

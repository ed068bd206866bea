//! Redirect probe adapter: raw response introspection for resolution.
//!
//! Deliberately bypasses [`HttpShortenerApi`](super::HttpShortenerApi): the
//! resolution procedure needs the numeric status and the `Location` header
//! of an un-followed 3xx, which a normalised client would discard.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url, header, redirect};
use tracing::debug;

use crate::domain::ShortCode;
use crate::domain::ports::{ProbeError, ProbeResponse, RedirectProbe};

/// Probe with redirect-following disabled at the transport level.
pub struct HttpRedirectProbe {
    client: Client,
    base_url: Url,
}

impl HttpRedirectProbe {
    /// Build the probe against the service origin.
    ///
    /// The cookie jar is shared semantics, not authentication: the redirect
    /// entrypoint is unauthenticated-friendly, but the original client sent
    /// credentials on resolution too.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl RedirectProbe for HttpRedirectProbe {
    async fn probe(&self, code: &ShortCode) -> Result<ProbeResponse, ProbeError> {
        let url = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            code.as_str()
        );
        let response = self.client.get(&url).send().await.map_err(|error| {
            debug!(error = %error, "redirect probe could not complete");
            ProbeError::blocked(error.to_string())
        })?;
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        Ok(ProbeResponse { status, location })
    }
}

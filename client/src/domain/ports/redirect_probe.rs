//! Port for observing raw resolution responses without following redirects.

use async_trait::async_trait;

use crate::domain::ShortCode;

/// Raw response observed with redirect-following disabled.
///
/// The resolution procedure needs the numeric status and the unmodified
/// `Location` header; a normalised client would discard both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    /// HTTP status code of the un-followed response.
    pub status: u16,
    /// Verbatim `Location` header value, when one was sent.
    pub location: Option<String>,
}

/// Errors raised by redirect probe adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// The user agent refused to complete the request or to expose the
    /// response (cross-origin policy, connection failure).
    #[error("redirect probe failed: {message}")]
    Blocked {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl ProbeError {
    /// Construct a [`ProbeError::Blocked`].
    pub fn blocked(message: impl Into<String>) -> Self {
        Self::Blocked {
            message: message.into(),
        }
    }
}

/// GET the resolution endpoint for a code with redirects left un-followed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectProbe: Send + Sync {
    /// Issue the probe and report the raw status and `Location` header.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Blocked`] when the response could not be
    /// completed or observed at all.
    async fn probe(&self, code: &ShortCode) -> Result<ProbeResponse, ProbeError>;
}

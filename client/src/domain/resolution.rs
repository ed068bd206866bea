//! Short-link resolution: classify a raw resolution response and decide a
//! navigation effect.
//!
//! The procedure never performs navigation itself. It returns a
//! [`Resolution`] value and the hosting shell carries it out, which keeps
//! the decision logic testable without a user agent. Cancellation is
//! dropping the in-flight future; the procedure mutates no external state.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::domain::ports::{ProbeResponse, RedirectProbe};
use crate::domain::ShortCode;

/// Statuses the procedure treats as redirects.
const REDIRECT_STATUSES: [u16; 4] = [301, 302, 307, 308];

const STATUS_NOT_FOUND: u16 = 404;
const STATUS_GONE: u16 = 410;

/// Navigation effect decided by the resolution procedure.
///
/// Terminal in every variant: the procedure runs at most one probe per call
/// and never loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Navigate top-level to the redirect target. The success path; the
    /// target is the `Location` header value, unmodified.
    Redirect {
        /// Destination to navigate to.
        location: String,
    },
    /// Terminal: the code is unknown to the server.
    NotFound,
    /// Terminal: the link existed but its expiry has passed.
    Expired,
    /// Navigate to the resolution endpoint itself and let the server-side
    /// redirect execute natively. Chosen when the raw response is ambiguous
    /// or the probe was blocked outright; availability wins over
    /// classification for that case.
    ServerSide {
        /// Resolution endpoint URL for the code.
        url: String,
    },
    /// The path segment is not a short code; the default route applies and
    /// no request was issued.
    Deferred,
}

/// Resolves short codes against the service's redirect entrypoint.
pub struct Resolver {
    probe: Arc<dyn RedirectProbe>,
    base_url: Url,
}

impl Resolver {
    /// Build a resolver over a probe and the service base URL.
    pub fn new(probe: Arc<dyn RedirectProbe>, base_url: Url) -> Self {
        Self { probe, base_url }
    }

    /// Resolve a raw path segment into a navigation effect.
    ///
    /// Segments that do not match the generated code shape defer to the
    /// default route without touching the network, so application routes
    /// sharing the same path depth are never swallowed.
    pub async fn resolve(&self, raw_code: &str) -> Resolution {
        let Some(code) = ShortCode::parse(raw_code) else {
            return Resolution::Deferred;
        };
        match self.probe.probe(&code).await {
            Ok(response) => classify_probe(&response, || self.resolve_url(&code)),
            Err(error) => {
                // Indistinguishable from a cross-origin refusal; hand the
                // navigation to the server rather than show a wrong error.
                debug!(code = %code, error = %error, "redirect probe blocked; falling back");
                Resolution::ServerSide {
                    url: self.resolve_url(&code),
                }
            }
        }
    }

    /// Resolution endpoint URL for a code.
    pub fn resolve_url(&self, code: &ShortCode) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            code.as_str()
        )
    }
}

/// Map a raw probe response onto a navigation effect.
fn classify_probe(response: &ProbeResponse, fallback_url: impl FnOnce() -> String) -> Resolution {
    if REDIRECT_STATUSES.contains(&response.status) {
        if let Some(location) = response.location.clone() {
            return Resolution::Redirect { location };
        }
        // A redirect with no target is as ambiguous as a blocked probe.
        return Resolution::ServerSide {
            url: fallback_url(),
        };
    }
    match response.status {
        STATUS_GONE => Resolution::Expired,
        STATUS_NOT_FOUND => Resolution::NotFound,
        _ => Resolution::ServerSide {
            url: fallback_url(),
        },
    }
}

#[cfg(test)]
#[path = "resolution_tests.rs"]
mod tests;

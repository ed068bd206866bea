//! Port over the shortening service's JSON REST surface.

use async_trait::async_trait;

use crate::domain::{
    ClassifiedError, Identity, LoginRequest, RegisterRequest, ShortLink, ShortenRequest,
};

/// Typed access to every JSON endpoint of the shortening service.
///
/// Implementations are stateless beyond connection reuse and safe to share
/// across call sites; every failure surfaces as a [`ClassifiedError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortenerApi: Send + Sync {
    /// Create an account and return the new identity.
    async fn register(&self, request: &RegisterRequest) -> Result<Identity, ClassifiedError>;

    /// Authenticate and return the identity, with the wire's `userId` field
    /// already normalised to `id`.
    async fn login(&self, request: &LoginRequest) -> Result<Identity, ClassifiedError>;

    /// Clear the server-side session cookie.
    async fn logout(&self) -> Result<(), ClassifiedError>;

    /// Fetch the authenticated user's links, newest first.
    ///
    /// Doubles as the session probe: a 401 from this endpoint is how the
    /// session cache learns the cookie has lapsed.
    async fn list_links(&self) -> Result<Vec<ShortLink>, ClassifiedError>;

    /// Create a short link from a validated request.
    async fn shorten(&self, request: &ShortenRequest) -> Result<ShortLink, ClassifiedError>;

    /// Delete a link by its server-assigned id.
    async fn delete_link(&self, id: &str) -> Result<(), ClassifiedError>;
}

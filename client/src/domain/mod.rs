//! Domain layer: data model, error taxonomy, and the three core behaviours.
//!
//! Purpose: hold every protocol-level decision — response classification,
//! session reconciliation, resolution outcomes — behind ports, free of
//! transport and filesystem concerns. Types are immutable where practical
//! and document their invariants and serde contracts in Rustdoc.
//!
//! Public surface:
//! - [`ClassifiedError`] / [`ErrorKind`] — the only failure type consumers
//!   above the transport boundary observe.
//! - [`ApiEnvelope`] — the uniform response shape of every JSON endpoint.
//! - [`Identity`], [`LoginRequest`], [`RegisterRequest`] — the principal and
//!   its credential payloads.
//! - [`ShortLink`], [`LinkStatus`], [`ShortCode`], [`ShortenRequest`] — the
//!   link model, derived expiry states, and client-side validation.
//! - [`SessionCache`] / [`SessionPhase`] — cached identity with startup
//!   revalidation.
//! - [`Resolver`] / [`Resolution`] — short-code resolution as navigation
//!   effects.
//! - [`LinkFeed`] and friends — the polling dashboard feed.
//! - [`ports`] — traits implemented by outbound adapters.

mod envelope;
mod error;
mod feed;
mod identity;
mod link;
pub mod ports;
mod resolution;
mod session;

pub use self::envelope::ApiEnvelope;
pub use self::error::{ClassifiedError, ErrorKind};
pub use self::feed::{FeedDirective, FeedObserver, LinkFeed, LinkSnapshot, REFRESH_INTERVAL};
pub use self::identity::{Identity, LoginRequest, RegisterRequest};
pub use self::link::{
    CUSTOM_CODE_MAX_LEN, CUSTOM_CODE_MIN_LEN, EXPIRING_SOON_DAYS, GENERATED_CODE_LEN, LinkStatus,
    ShortCode, ShortLink, ShortenRequest, ShortenValidationError,
};
pub use self::resolution::{Resolution, Resolver};
pub use self::session::{SessionCache, SessionPhase};

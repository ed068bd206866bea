//! ZipLink client library.
//!
//! A typed client for the ZipLink URL-shortening service, built around three
//! cooperating pieces:
//!
//! - a transport client that normalises transport, server, and
//!   application-level failures into one
//!   [`ClassifiedError`](domain::ClassifiedError) taxonomy;
//! - a [`SessionCache`](domain::SessionCache) that persists the
//!   authenticated identity across restarts and reconciles it with
//!   server-side session validity on startup;
//! - a [`Resolver`](domain::Resolver) that turns a short code into an
//!   explicit navigation effect, working around the user agent's
//!   cross-origin redirect restrictions.
//!
//! The domain layer never touches the network or the filesystem directly;
//! adapters in [`outbound`] implement its ports, and the [`inbound`] CLI
//! shell drives it.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;

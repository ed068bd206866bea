//! HTTP adapters over the shortening service.
//!
//! Two deliberately separate clients: [`HttpShortenerApi`] normalises every
//! JSON endpoint behind the classification boundary, while
//! [`HttpRedirectProbe`] exposes raw redirect responses for the resolution
//! procedure.

mod client;
mod dto;
mod probe;

pub use self::client::HttpShortenerApi;
pub use self::probe::HttpRedirectProbe;

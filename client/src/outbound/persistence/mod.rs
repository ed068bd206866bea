//! Durable client-side state adapters.
//!
//! Thin adapters only: translate between files and domain types, no session
//! policy. The write-through discipline lives in the session cache.

mod identity_file;

pub use identity_file::FileIdentityStore;

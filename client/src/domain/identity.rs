//! Authenticated principal and the credential payloads that produce one.

use serde::{Deserialize, Serialize};

/// The authenticated principal.
///
/// Owned exclusively by the session cache, which mirrors it into durable
/// storage write-through on every mutation. Identifiers are opaque
/// server-assigned strings; the client never mints or validates them.
///
/// The wire sometimes spells the field names in PascalCase (the server's ORM
/// models carry no JSON tags), so deserialisation accepts both spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Stable user identifier.
    #[serde(alias = "Id")]
    pub id: String,
    /// Display name chosen at registration.
    #[serde(alias = "Name")]
    pub name: String,
    /// Account email address.
    #[serde(alias = "Email")]
    pub email: String,
}

/// Credentials submitted to the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email address.
    pub email: String,
    /// Plaintext password; only ever sent over the transport, never stored.
    pub password: String,
}

/// Payload submitted to the registration endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name for the new account.
    pub name: String,
    /// Account email address.
    pub email: String,
    /// Plaintext password; only ever sent over the transport, never stored.
    pub password: String,
}

//! Uniform response envelope shared by every JSON endpoint.

use serde::{Deserialize, Serialize};

/// Response shape returned by every endpoint except raw redirect resolution.
///
/// ## Invariants
/// - `success == false` means the response is a failure regardless of the
///   HTTP status code it arrived with.
/// - `success == true` with absent `data` is valid for operations that carry
///   no payload (logout, delete).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    /// Whether the operation succeeded. Authoritative over the HTTP status.
    pub success: bool,
    /// Human-readable outcome description.
    #[serde(default)]
    pub message: String,
    /// Operation payload, when the endpoint has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Machine-readable error code accompanying failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

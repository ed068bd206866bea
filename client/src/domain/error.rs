//! Client-observed error taxonomy.
//!
//! The transport client is the sole classification boundary: every failure a
//! consumer above it sees is a [`ClassifiedError`]. Adapters map their own
//! failure modes (socket errors, parse errors, envelope failures) into one of
//! the four [`ErrorKind`] categories here; nothing above the boundary ever
//! inspects a raw transport error.

use std::fmt;

/// Category of a classified failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The transport could not complete the request at all.
    Network,
    /// The server answered with a 5xx status; the body was never trusted.
    ServerUnavailable,
    /// The response envelope reported failure, whatever the HTTP status.
    Application,
    /// The response could not be interpreted as an envelope.
    Unknown,
}

/// Classified failure produced at the transport boundary.
///
/// ## Invariants
/// - `status` is the HTTP status of the completed response, or `0` when the
///   failure happened below HTTP (the [`ErrorKind::Network`] case).
/// - `message` is human-readable and safe to surface inline on a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    kind: ErrorKind,
    status: u16,
    message: String,
    code: Option<String>,
}

impl ClassifiedError {
    /// Construct a classified error from its parts.
    pub fn new(kind: ErrorKind, status: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
            code: None,
        }
    }

    /// Convenience constructor for [`ErrorKind::Network`]; status is `0`.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, 0, message)
    }

    /// Convenience constructor for [`ErrorKind::ServerUnavailable`].
    pub fn server_unavailable(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServerUnavailable, status, message)
    }

    /// Convenience constructor for [`ErrorKind::Application`].
    pub fn application(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Application, status, message)
    }

    /// Convenience constructor for [`ErrorKind::Unknown`].
    pub fn unknown(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, status, message)
    }

    /// Attach the machine-readable error code from the envelope.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Failure category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status carried by the failure; `0` for transport-level failures.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Human-readable message suitable for inline display.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Machine-readable error code from the envelope, when present.
    pub fn error_code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Whether this failure proves the session cookie is no longer valid.
    ///
    /// Only a 401 that made it through to the application layer counts; a
    /// transport outage or a 5xx says nothing about the session and must not
    /// log the user out.
    pub fn invalidates_session(&self) -> bool {
        self.status == 401 && matches!(self.kind, ErrorKind::Application | ErrorKind::Unknown)
    }
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ClassifiedError {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use rstest::rstest;

    #[test]
    fn network_errors_carry_status_zero() {
        let err = ClassifiedError::network("unreachable");
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.status(), 0);
        assert_eq!(err.message(), "unreachable");
        assert!(err.error_code().is_none());
    }

    #[test]
    fn with_code_preserves_other_fields() {
        let err = ClassifiedError::application(409, "taken").with_code("Conflict");
        assert_eq!(err.status(), 409);
        assert_eq!(err.message(), "taken");
        assert_eq!(err.error_code(), Some("Conflict"));
    }

    #[rstest]
    #[case::application_401(ClassifiedError::application(401, "unauthorized"), true)]
    #[case::unknown_401(ClassifiedError::unknown(401, "unparseable"), true)]
    #[case::application_403(ClassifiedError::application(403, "forbidden"), false)]
    #[case::server_unavailable(ClassifiedError::server_unavailable(503, "down"), false)]
    #[case::network(ClassifiedError::network("offline"), false)]
    fn only_application_level_401_invalidates_session(
        #[case] err: ClassifiedError,
        #[case] expected: bool,
    ) {
        assert_eq!(err.invalidates_session(), expected);
    }

    #[test]
    fn display_shows_the_message() {
        let err = ClassifiedError::unknown(200, "garbled body");
        assert_eq!(err.to_string(), "garbled body");
    }
}

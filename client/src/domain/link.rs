//! Short link model, derived expiry states, and shorten-request validation.

use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Length of server-generated short codes (seven base62 characters).
pub const GENERATED_CODE_LEN: usize = 7;

/// Minimum length accepted for a caller-supplied custom code.
pub const CUSTOM_CODE_MIN_LEN: usize = 3;

/// Maximum length accepted for a caller-supplied custom code.
pub const CUSTOM_CODE_MAX_LEN: usize = 20;

/// Links expiring within this many days count as expiring soon.
pub const EXPIRING_SOON_DAYS: i64 = 7;

const SECONDS_PER_DAY: i64 = 86_400;

/// A user-owned mapping from a short code to a destination URL.
///
/// Held only as a transient in-memory list (newest first, as served); the
/// client keeps no durable link cache. The wire sometimes spells field names
/// in PascalCase (the server's ORM models carry no JSON tags), so
/// deserialisation accepts both spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLink {
    /// Server-assigned link identifier.
    #[serde(alias = "Id")]
    pub id: String,
    /// Identifier of the owning user.
    #[serde(default, alias = "UserId")]
    pub user_id: String,
    /// Destination URL.
    #[serde(alias = "Long")]
    pub long: String,
    /// Short code, generated or custom.
    #[serde(alias = "Short")]
    pub short: String,
    /// Recorded click count; some payloads omit it entirely.
    #[serde(default, alias = "Clicks")]
    pub clicks: u64,
    /// Creation instant. The ORM emits a year-one zero value when unset;
    /// that sentinel deserialises to `None`.
    #[serde(
        default,
        alias = "CreatedAt",
        deserialize_with = "orm_zero_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Instant after which the server stops resolving the link.
    #[serde(alias = "Expiry")]
    pub expiry: DateTime<Utc>,
}

/// Expiry state derived from `expiry` against the current instant.
///
/// Never stored; recomputed on every feed tick so a link can drift from
/// [`LinkStatus::Active`] to [`LinkStatus::Expired`] without a server round
/// trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// More than [`EXPIRING_SOON_DAYS`] days remain.
    Active,
    /// Between one and [`EXPIRING_SOON_DAYS`] days remain, rounded up.
    ExpiringSoon,
    /// The expiry instant has passed.
    Expired,
}

impl ShortLink {
    /// Derive the expiry state of this link at `now`.
    pub fn status_at(&self, now: DateTime<Utc>) -> LinkStatus {
        if self.expiry < now {
            return LinkStatus::Expired;
        }
        let days = self.days_until_expiry(now);
        if days > 0 && days <= EXPIRING_SOON_DAYS {
            LinkStatus::ExpiringSoon
        } else {
            LinkStatus::Active
        }
    }

    /// Whole days remaining before expiry, rounded up.
    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        let seconds = (self.expiry - now).num_seconds();
        let days = seconds / SECONDS_PER_DAY;
        if seconds % SECONDS_PER_DAY > 0 {
            days + 1
        } else {
            days
        }
    }
}

fn orm_zero_as_none<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let instant = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(instant.filter(|value| value.year() > 1))
}

/// Path segment matching the shortener's generated code shape.
///
/// The resolution procedure only ever probes codes of this shape; anything
/// else belongs to the default application route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortCode(String);

impl ShortCode {
    /// Accept exactly [`GENERATED_CODE_LEN`] ASCII alphanumeric characters.
    pub fn parse(raw: &str) -> Option<Self> {
        let matches_shape =
            raw.len() == GENERATED_CODE_LEN && raw.chars().all(|c| c.is_ascii_alphanumeric());
        matches_shape.then(|| Self(raw.to_owned()))
    }

    /// Code as a path segment.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures raised before a shorten request touches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenValidationError {
    /// The custom code is shorter than [`CUSTOM_CODE_MIN_LEN`].
    CustomCodeTooShort,
    /// The custom code is longer than [`CUSTOM_CODE_MAX_LEN`].
    CustomCodeTooLong,
    /// The custom code contains characters outside `[A-Za-z0-9]`.
    CustomCodeNotAlphanumeric,
    /// The requested expiry is not strictly in the future.
    ExpiryNotInFuture,
}

impl fmt::Display for ShortenValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CustomCodeTooShort => write!(
                f,
                "Custom short code must be at least {CUSTOM_CODE_MIN_LEN} characters"
            ),
            Self::CustomCodeTooLong => write!(
                f,
                "Custom short code must be at most {CUSTOM_CODE_MAX_LEN} characters"
            ),
            Self::CustomCodeNotAlphanumeric => {
                write!(f, "Custom short code must contain only letters and numbers")
            }
            Self::ExpiryNotInFuture => write!(f, "Expiry date must be in the future"),
        }
    }
}

impl std::error::Error for ShortenValidationError {}

/// Payload for the shorten endpoint, validated client-side on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// Destination URL to shorten.
    pub long: String,
    /// Caller-supplied code in place of a generated one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_short: Option<String>,
    /// Expiry instant (ISO-8601 on the wire). The server applies a 30-day
    /// default when omitted; the client never fabricates one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl ShortenRequest {
    /// Validate and build a request.
    ///
    /// `now` comes from the caller's clock so the future-expiry rule stays
    /// deterministic under test.
    ///
    /// # Errors
    ///
    /// Returns a [`ShortenValidationError`] when the custom code breaks the
    /// length or character rules, or when `expiry` is not in the future.
    pub fn new(
        long: impl Into<String>,
        custom_short: Option<String>,
        expiry: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Self, ShortenValidationError> {
        if let Some(code) = custom_short.as_deref() {
            validate_custom_code(code)?;
        }
        if expiry.is_some_and(|instant| instant <= now) {
            return Err(ShortenValidationError::ExpiryNotInFuture);
        }
        Ok(Self {
            long: long.into(),
            custom_short,
            expiry,
        })
    }
}

fn validate_custom_code(code: &str) -> Result<(), ShortenValidationError> {
    if code.len() < CUSTOM_CODE_MIN_LEN {
        return Err(ShortenValidationError::CustomCodeTooShort);
    }
    if code.len() > CUSTOM_CODE_MAX_LEN {
        return Err(ShortenValidationError::CustomCodeTooLong);
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ShortenValidationError::CustomCodeNotAlphanumeric);
    }
    Ok(())
}

#[cfg(test)]
#[path = "link_tests.rs"]
mod tests;

//! Optimistic-concurrency entity tags.
//!
//! An entity tag is the base64 encoding of the record's last update
//! timestamp. Clients echo it back in `If-Match`; this layer forwards the
//! value verbatim and leaves the comparison to the service.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for [`ETag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ETagValidationError {
    /// The token was empty once trimmed.
    #[error("entity tag must not be empty")]
    Empty,
}

/// Opaque concurrency token.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use ghc_api::domain::ETag;
///
/// let updated_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
/// let tag = ETag::for_timestamp(updated_at);
/// assert_eq!(tag, ETag::for_timestamp(updated_at));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ETag(String);

impl ETag {
    /// Wrap a token received from a client, unchanged.
    ///
    /// # Errors
    /// Returns [`ETagValidationError::Empty`] for blank input.
    pub fn new(value: impl Into<String>) -> Result<Self, ETagValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ETagValidationError::Empty);
        }
        Ok(Self(raw))
    }

    /// Derive the tag for a record last updated at `updated_at`.
    #[must_use]
    pub fn for_timestamp(updated_at: DateTime<Utc>) -> Self {
        let stamp = updated_at.to_rfc3339_opts(SecondsFormat::Nanos, true);
        Self(STANDARD.encode(stamp))
    }

    /// Borrow the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

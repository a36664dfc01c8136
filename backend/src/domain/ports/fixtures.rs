//! Shared values for the fixture port implementations.

use chrono::{DateTime, Utc};

/// Timestamp stamped on every fixture record: 2024-05-01T12:00:00Z.
pub(super) fn fixture_timestamp() -> DateTime<Utc> {
    DateTime::from_timestamp(1_714_564_800, 0).unwrap_or_default()
}

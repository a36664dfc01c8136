//! Quality assurance evaluation reports.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// What an evaluation report inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationReportType {
    /// Inspection of a single shipment.
    Shipment,
    /// Inspection of the counseling session for a move.
    Counseling,
}

/// Where an inspection took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InspectionLocation {
    /// At the origin address.
    Origin,
    /// At the destination address.
    Destination,
    /// Elsewhere; see the location description.
    Other,
}

/// Validation errors for [`MoveLocator`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("move locator must be six upper-case letters or digits (got {0:?})")]
pub struct MoveLocatorValidationError(pub String);

/// Six-character public move code.
///
/// # Examples
/// ```
/// use ghc_api::domain::MoveLocator;
///
/// assert!(MoveLocator::new("ABC123").is_ok());
/// assert!(MoveLocator::new("abc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MoveLocator(String);

impl MoveLocator {
    /// Validate and wrap a locator.
    ///
    /// # Errors
    /// Returns [`MoveLocatorValidationError`] for malformed codes.
    pub fn new(value: impl Into<String>) -> Result<Self, MoveLocatorValidationError> {
        let raw = value.into();
        let well_formed = raw.len() == 6
            && raw
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
        if well_formed {
            Ok(Self(raw))
        } else {
            Err(MoveLocatorValidationError(raw))
        }
    }

    /// Borrow the locator.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for MoveLocator {
    type Error = MoveLocatorValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MoveLocator> for String {
    fn from(value: MoveLocator) -> Self {
        value.0
    }
}

impl fmt::Display for MoveLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored evaluation report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationReport {
    /// Report identifier.
    pub id: Uuid,
    /// Move under evaluation.
    pub move_id: Uuid,
    /// Shipment under evaluation, for shipment reports.
    pub shipment_id: Option<Uuid>,
    /// Evaluator who owns the report.
    pub office_user_id: Uuid,
    /// Shipment or counseling report.
    pub report_type: EvaluationReportType,
    /// Day of the inspection.
    pub inspection_date: Option<NaiveDate>,
    /// Inspection location.
    pub location: Option<InspectionLocation>,
    /// Free-text location when `location` is `Other`.
    pub location_description: Option<String>,
    /// Whether any violations were observed.
    pub violations_observed: Option<bool>,
    /// Evaluator remarks.
    pub remarks: Option<String>,
    /// Set once the report is submitted; submitted reports are read-only.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp; source of the entity tag.
    pub updated_at: DateTime<Utc>,
}

/// Draft report handed to the creator service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvaluationReport {
    /// Identifier allocated by the handler.
    pub id: Uuid,
    /// Shipment or counseling report.
    pub report_type: EvaluationReportType,
    /// Shipment under evaluation, for shipment reports.
    pub shipment_id: Option<Uuid>,
    /// Evaluator creating the report.
    pub office_user_id: Option<Uuid>,
}

/// Evaluator edits saved against a draft report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationReportUpdate {
    /// Report being edited.
    pub id: Uuid,
    /// Evaluator saving the report.
    pub office_user_id: Option<Uuid>,
    /// Day of the inspection.
    pub inspection_date: Option<NaiveDate>,
    /// Inspection location.
    pub location: Option<InspectionLocation>,
    /// Free-text location.
    pub location_description: Option<String>,
    /// Whether any violations were observed.
    pub violations_observed: Option<bool>,
    /// Evaluator remarks.
    pub remarks: Option<String>,
}

/// Printable rendition of a report, served for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationReportDocument {
    /// Suggested file name, including the `.pdf` extension.
    pub file_name: String,
    /// PDF bytes.
    pub pdf: Vec<u8>,
}

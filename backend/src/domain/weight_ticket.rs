//! Weight tickets recorded against a PPM shipment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review outcome for a PPM closeout document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PpmDocumentStatus {
    /// Accepted by the reviewer.
    Approved,
    /// Excluded from the incentive calculation.
    Excluded,
    /// Rejected; the customer must resubmit.
    Rejected,
}

/// Empty/full weight pair for one vehicle trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTicket {
    /// Ticket identifier.
    pub id: Uuid,
    /// Shipment the ticket belongs to.
    pub ppm_shipment_id: Uuid,
    /// Free-text vehicle description.
    pub vehicle_description: Option<String>,
    /// Empty vehicle weight in pounds.
    pub empty_weight: Option<u32>,
    /// Loaded vehicle weight in pounds.
    pub full_weight: Option<u32>,
    /// Whether the customer owns the trailer used.
    pub owns_trailer: bool,
    /// Whether the trailer meets reimbursement criteria.
    pub trailer_meets_criteria: bool,
    /// Net weight after office adjustment.
    pub adjusted_net_weight: Option<u32>,
    /// Remarks explaining the adjustment.
    pub net_weight_remarks: Option<String>,
    /// Review outcome.
    pub status: Option<PpmDocumentStatus>,
    /// Reviewer's reason for an exclusion or rejection.
    pub reason: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp; source of the entity tag.
    pub updated_at: DateTime<Utc>,
}

/// Office edits to a weight ticket. `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WeightTicketUpdate {
    /// Ticket being edited.
    pub id: Uuid,
    /// Shipment named in the request path.
    pub ppm_shipment_id: Uuid,
    /// New empty weight.
    pub empty_weight: Option<u32>,
    /// New full weight.
    pub full_weight: Option<u32>,
    /// New trailer ownership flag.
    pub owns_trailer: Option<bool>,
    /// New trailer criteria flag.
    pub trailer_meets_criteria: Option<bool>,
    /// New adjusted net weight.
    pub adjusted_net_weight: Option<u32>,
    /// New adjustment remarks.
    pub net_weight_remarks: Option<String>,
    /// New review outcome.
    pub status: Option<PpmDocumentStatus>,
    /// New review reason.
    pub reason: Option<String>,
}

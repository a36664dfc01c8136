//! Gun safe weight tickets recorded against a PPM shipment.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::PpmDocumentStatus;

/// Weight claimed for a gun safe moved as part of a PPM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GunSafeWeightTicket {
    /// Ticket identifier.
    pub id: Uuid,
    /// Shipment the ticket belongs to.
    pub ppm_shipment_id: Uuid,
    /// Supporting document set.
    pub document_id: Uuid,
    /// Description of the safe.
    pub description: Option<String>,
    /// Claimed weight in pounds.
    pub weight: Option<u32>,
    /// Whether weight tickets back the claim (as opposed to a constructed weight).
    pub has_weight_tickets: Option<bool>,
    /// Review outcome.
    pub status: Option<PpmDocumentStatus>,
    /// Reviewer's reason for an exclusion or rejection.
    pub reason: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp; source of the entity tag.
    pub updated_at: DateTime<Utc>,
}

/// Edits to a gun safe weight ticket. `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GunSafeWeightTicketUpdate {
    /// Ticket being edited.
    pub id: Uuid,
    /// Shipment named in the request path.
    pub ppm_shipment_id: Uuid,
    /// New description.
    pub description: Option<String>,
    /// New weight.
    pub weight: Option<u32>,
    /// New weight-ticket flag.
    pub has_weight_tickets: Option<bool>,
    /// New review outcome.
    pub status: Option<PpmDocumentStatus>,
    /// New review reason.
    pub reason: Option<String>,
}

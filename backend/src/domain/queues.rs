//! Office work queues: filtered, paginated lists of moves and payment
//! requests.
//!
//! The filters here are already normalised by the inbound adapter (status
//! defaults applied, GBLOC override resolved against the caller's session).
//! Services apply them as query predicates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Gbloc, MoveLocator};

/// Lifecycle status of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveStatus {
    /// Customer has not submitted yet.
    #[serde(rename = "DRAFT")]
    Draft,
    /// Awaiting a services counselor.
    #[serde(rename = "NEEDS SERVICE COUNSELING")]
    NeedsServiceCounseling,
    /// Counseling done; ready for the TOO.
    #[serde(rename = "SERVICE COUNSELING COMPLETED")]
    ServiceCounselingCompleted,
    /// Submitted by the customer.
    #[serde(rename = "SUBMITTED")]
    Submitted,
    /// Prime requested approval of new items.
    #[serde(rename = "APPROVALS REQUESTED")]
    ApprovalsRequested,
    /// Approved by the TOO.
    #[serde(rename = "APPROVED")]
    Approved,
    /// Cancelled.
    #[serde(rename = "CANCELED")]
    Canceled,
}

impl MoveStatus {
    /// Statuses shown in the TOO queue when the caller does not filter.
    pub const DEFAULT_QUEUE_STATUSES: [Self; 3] = [
        Self::ServiceCounselingCompleted,
        Self::ApprovalsRequested,
        Self::Submitted,
    ];
}

/// Lifecycle status of a payment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentRequestStatus {
    /// Awaiting TIO review.
    Pending,
    /// Reviewed with at least one item approved.
    Reviewed,
    /// Reviewed with every item rejected.
    ReviewedAllRejected,
    /// Sent to the payment system.
    SentToGex,
    /// Acknowledged by the payment system.
    ReceivedByGex,
    /// Paid.
    Paid,
    /// Failed EDI processing.
    EdiError,
    /// Superseded by another request.
    Deprecated,
}

/// Sort direction for queue listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// Sortable columns of the move queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveQueueSort {
    /// Move locator.
    Locator,
    /// Move status.
    Status,
    /// Customer last, first name.
    CustomerName,
    /// Customer DoD identifier.
    Edipi,
    /// Customer branch of service.
    Branch,
    /// Origin duty location name.
    OriginDutyLocation,
    /// Earliest requested move date.
    RequestedMoveDate,
    /// When the move appeared in the TOO queue.
    AppearedInTooAt,
    /// Origin GBLOC.
    OriginGbloc,
}

/// Sortable columns of the payment request queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentRequestQueueSort {
    /// Move locator.
    Locator,
    /// Customer last, first name.
    LastName,
    /// Customer DoD identifier.
    DodId,
    /// Days since submission.
    Age,
    /// Submission timestamp.
    SubmittedAt,
    /// Origin GBLOC.
    OriginGbloc,
}

/// Customer columns shared by both queues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueCustomer {
    /// Customer identifier.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// DoD identifier.
    pub dod_id: Option<String>,
    /// Branch of service.
    pub branch: Option<String>,
}

/// Normalised move queue filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveQueueFilter {
    /// Statuses to include; never empty.
    pub statuses: Vec<MoveStatus>,
    /// Exact move locator.
    pub locator: Option<String>,
    /// Customer last name prefix.
    pub last_name: Option<String>,
    /// Customer DoD identifier.
    pub dod_id: Option<String>,
    /// Branch of service.
    pub branch: Option<String>,
    /// Origin duty location name prefix.
    pub origin_duty_location: Option<String>,
    /// GBLOC to list instead of the office user's default GBLOC.
    pub view_as_gbloc: Option<Gbloc>,
    /// Sort column.
    pub sort: Option<MoveQueueSort>,
    /// Sort direction.
    pub order: Option<SortOrder>,
}

/// One row of the move queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMove {
    /// Move identifier.
    pub id: Uuid,
    /// Move locator.
    pub locator: MoveLocator,
    /// Customer columns.
    pub customer: QueueCustomer,
    /// Move status.
    pub status: MoveStatus,
    /// Earliest requested pickup date across shipments.
    pub requested_move_date: Option<NaiveDate>,
    /// When the move entered the TOO queue.
    pub appeared_in_too_at: Option<DateTime<Utc>>,
    /// Number of shipments on the move.
    pub shipments_count: u32,
    /// Origin duty location name.
    pub origin_duty_location: Option<String>,
    /// Origin GBLOC.
    pub origin_gbloc: Option<Gbloc>,
}

/// Normalised payment request queue filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequestQueueFilter {
    /// Status to include; the queue only ever lists pending requests.
    pub status: PaymentRequestStatus,
    /// Exact move locator.
    pub locator: Option<String>,
    /// Customer last name prefix.
    pub last_name: Option<String>,
    /// Customer DoD identifier.
    pub dod_id: Option<String>,
    /// Submission day.
    pub submitted_at: Option<NaiveDate>,
    /// GBLOC to list instead of the office user's default GBLOC.
    pub view_as_gbloc: Option<Gbloc>,
    /// Sort column.
    pub sort: Option<PaymentRequestQueueSort>,
    /// Sort direction.
    pub order: Option<SortOrder>,
}

/// One row of the payment request queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuePaymentRequest {
    /// Payment request identifier.
    pub id: Uuid,
    /// Move the request was raised against.
    pub move_id: Uuid,
    /// Move locator.
    pub locator: MoveLocator,
    /// Customer columns.
    pub customer: QueueCustomer,
    /// Request status.
    pub status: PaymentRequestStatus,
    /// Days since submission.
    pub age_days: u32,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
    /// Origin GBLOC.
    pub origin_gbloc: Option<Gbloc>,
    /// Origin duty location name.
    pub origin_duty_location: Option<String>,
}

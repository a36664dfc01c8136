//! Domain primitives, entities, and ports.
//!
//! Purpose: hold the transport-agnostic vocabulary shared by the HTTP
//! adapter and the services behind it. Nothing in this module depends on
//! Actix.
//!
//! Public surface:
//! - `TraceId`: request correlation identifier.
//! - `Session` / `RequestContext`: who is calling and how to correlate it.
//! - `ServiceError`: the closed set of failures a service may report.
//! - Entities for weight tickets, gun safe weight tickets, evaluation
//!   reports, and queue rows.
//! - `ports`: one trait per group of service operations.

pub mod context;
pub mod error;
pub mod etag;
pub mod evaluation_report;
pub mod feature_flag;
pub mod gun_safe_weight_ticket;
pub mod ports;
pub mod queues;
pub mod session;
pub mod trace_id;
pub mod weight_ticket;

pub use self::context::RequestContext;
pub use self::error::{FieldErrors, QuerySource, ServiceError, ServiceErrorKind};
pub use self::etag::{ETag, ETagValidationError};
pub use self::evaluation_report::{
    EvaluationReport, EvaluationReportDocument, EvaluationReportType, EvaluationReportUpdate,
    InspectionLocation, MoveLocator, MoveLocatorValidationError, NewEvaluationReport,
};
pub use self::feature_flag::{FeatureFlag, FlagAttributes, GUN_SAFE_FLAG};
pub use self::gun_safe_weight_ticket::{GunSafeWeightTicket, GunSafeWeightTicketUpdate};
pub use self::queues::{
    MoveQueueFilter, MoveQueueSort, MoveStatus, PaymentRequestQueueFilter,
    PaymentRequestQueueSort, PaymentRequestStatus, QueueCustomer, QueueMove,
    QueuePaymentRequest, SortOrder,
};
pub use self::session::{ApplicationName, Gbloc, GblocValidationError, RoleType, Session};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::weight_ticket::{PpmDocumentStatus, WeightTicket, WeightTicketUpdate};

/// Result alias for domain service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

//! Per-request context handed to every service call.

use super::{Session, TraceId};

/// Identity and correlation data for one inbound request.
///
/// Built once per request by the inbound adapter and dropped when the
/// handler returns. Services receive it by reference and must not retain it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    session: Option<Session>,
    trace_id: TraceId,
}

impl RequestContext {
    /// Bundle an optional session with the request's trace identifier.
    #[must_use]
    pub const fn new(session: Option<Session>, trace_id: TraceId) -> Self {
        Self { session, trace_id }
    }

    /// The authenticated session, when one is attached.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Correlation identifier for logs and error payloads.
    #[must_use]
    pub const fn trace_id(&self) -> TraceId {
        self.trace_id
    }
}

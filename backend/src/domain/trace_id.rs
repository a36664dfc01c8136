//! Request-scoped trace identifier for correlating logs with responses.
//!
//! The `Trace` middleware stores one [`TraceId`] per inbound request in
//! task-local storage. Handlers, the auditable scope, and error payloads read
//! it from there instead of threading it through every call.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`TraceId::scope`] when moving work onto another task so the identifier
//! follows it.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    /// Task-local storage for the current trace identifier.
    pub(crate) static TRACE_ID: TraceId;
}

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Per-request trace identifier exposed via task-local storage.
///
/// # Examples
/// ```
/// use ghc_api::TraceId;
///
/// async fn handler() {
///     if let Some(id) = TraceId::current() {
///         println!("trace id: {}", id);
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a new random trace identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn generate() -> Self { Self(Uuid::new_v4()) }

    /// Construct a trace identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the current trace identifier if one is in scope.
    #[must_use]
    #[rustfmt::skip]
    pub fn current() -> Option<Self> { TRACE_ID.try_with(|id| *id).ok() }

    /// Returns the identifier in scope, or a fresh one when running outside
    /// the `Trace` middleware.
    #[must_use]
    pub fn current_or_generate() -> Self {
        Self::current().unwrap_or_else(Self::generate)
    }

    /// Access the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Append the operator-facing instance tag to a user-visible message.
    ///
    /// # Examples
    /// ```
    /// use ghc_api::TraceId;
    /// use uuid::Uuid;
    ///
    /// let id = TraceId::from_uuid(Uuid::nil());
    /// assert_eq!(
    ///     id.tag("Not permitted."),
    ///     "Not permitted. Instance: 00000000-0000-0000-0000-000000000000"
    /// );
    /// ```
    #[must_use]
    pub fn tag(&self, message: &str) -> String {
        format!("{message} Instance: {}", self.0)
    }

    /// Execute the provided future with the supplied trace identifier in scope.
    ///
    /// # Examples
    /// ```
    /// use ghc_api::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
    ///     .parse()
    ///     .expect("valid UUID");
    /// let observed = TraceId::scope(trace_id, async move { TraceId::current() }).await;
    /// assert_eq!(observed, Some(trace_id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn current_reflects_scope() {
        let expected = TraceId::generate();
        let observed = TraceId::scope(expected, async move { TraceId::current() }).await;
        assert_eq!(observed, Some(expected));
    }

    #[tokio::test]
    async fn current_is_none_out_of_scope() {
        assert!(TraceId::current().is_none());
    }

    #[tokio::test]
    async fn current_or_generate_prefers_scoped_id() {
        let expected = TraceId::generate();
        let observed = TraceId::scope(expected, async { TraceId::current_or_generate() }).await;
        assert_eq!(observed, expected);
    }

    #[test]
    fn current_or_generate_falls_back_to_fresh_id() {
        let first = TraceId::current_or_generate();
        let second = TraceId::current_or_generate();
        assert_ne!(first, second);
    }

    #[test]
    fn from_str_round_trips() {
        let uuid = Uuid::nil();
        let trace_id: TraceId = uuid.to_string().parse().expect("parse uuid");
        assert_eq!(trace_id.as_uuid(), &uuid);
    }

    #[test]
    fn tag_appends_instance_suffix() {
        let trace_id = TraceId::from_uuid(Uuid::nil());
        let tagged = trace_id.tag("Stale data.");
        assert!(tagged.starts_with("Stale data. "));
        assert!(tagged.ends_with("Instance: 00000000-0000-0000-0000-000000000000"));
    }
}

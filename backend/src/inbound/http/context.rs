//! Request context extraction and the audited handler scope.
//!
//! [`AppContext`] is extracted once per request and bundles the caller's
//! identity with the request trace identifier. [`auditable`] runs a handler
//! body with that context inside a tracing span, converts panics into
//! internal errors, and logs each failure exactly once.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload};
use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;
use tracing::{Instrument, info_span};

use super::rejection::Rejection;
use super::session::SessionContext;
use crate::domain::{RequestContext, TraceId};

/// Per-request context handed to audited handler bodies.
#[derive(Debug, Clone)]
pub struct AppContext(RequestContext);

impl AppContext {
    /// Wrap an already-built request context.
    #[must_use]
    pub const fn new(request: RequestContext) -> Self {
        Self(request)
    }

    /// Borrow the underlying request context.
    #[must_use]
    pub const fn request(&self) -> &RequestContext {
        &self.0
    }
}

impl FromRequest for AppContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        Box::pin(async move {
            // Read here rather than in `from_request`: extractors are built
            // before the trace scope is entered.
            let trace_id = TraceId::current_or_generate();
            let session = session.await?.session();
            Ok(Self(RequestContext::new(session, trace_id)))
        })
    }
}

/// Run `body` as the audited implementation of `operation`.
///
/// The body owns the request context; it is dropped when the body finishes,
/// fails, or panics. Rejections are logged here and nowhere else.
pub async fn auditable<F, Fut>(
    operation: &'static str,
    ctx: AppContext,
    body: F,
) -> Result<HttpResponse, Rejection>
where
    F: FnOnce(RequestContext) -> Fut,
    Fut: Future<Output = Result<HttpResponse, Rejection>>,
{
    let AppContext(request) = ctx;
    let trace_id = request.trace_id();
    let span = info_span!("handler", operation, trace_id = %trace_id);

    let guarded = AssertUnwindSafe(async move { body(request).await }).catch_unwind();
    let outcome = TraceId::scope(trace_id, async move {
        match guarded.await {
            Ok(result) => result,
            Err(panic) => Err(Rejection::panicked(panic_message(panic.as_ref()))),
        }
    })
    .instrument(span.clone())
    .await;

    if let Err(rejection) = &outcome {
        span.in_scope(|| rejection.log(operation));
    }
    outcome
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_owned())
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

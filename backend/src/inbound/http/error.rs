//! Wire error payload and HTTP status mapping.
//!
//! Purpose: give every error response the same JSON shape
//! (`code`, `message`, `traceId`, `details`) and the same `trace-id` header,
//! whether it comes from a handler or from an extractor that failed before
//! the handler ran.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Stable machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed.
    InvalidRequest,
    /// No valid session is attached.
    Unauthorized,
    /// Authenticated but not permitted.
    Forbidden,
    /// The referenced record does not exist.
    NotFound,
    /// The request conflicts with the record's state.
    Conflict,
    /// The concurrency token is stale.
    PreconditionFailed,
    /// The request is well-formed but invalid.
    UnprocessableEntity,
    /// Anything else.
    InternalError,
}

impl ErrorCode {
    /// HTTP status carried by responses with this code.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::PreconditionFailed => StatusCode::PRECONDITION_FAILED,
            Self::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response payload.
///
/// Constructors capture the trace identifier in scope, so payloads built
/// inside a handler are correlated automatically.
///
/// # Examples
/// ```
/// use ghc_api::inbound::http::error::{ApiError, ErrorCode};
///
/// let err = ApiError::new(ErrorCode::NotFound, "missing");
/// assert_eq!(err.code, ErrorCode::NotFound);
/// assert!(err.trace_id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Stable machine-readable error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Correlation identifier for this request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Structured detail such as field-level validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    /// Build a payload with `message` as given.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Build a payload whose message ends with the `Instance: <trace id>` tag.
    #[must_use]
    pub fn tagged(code: ErrorCode, message: &str) -> Self {
        match TraceId::current() {
            Some(trace_id) => Self {
                code,
                message: trace_id.tag(message),
                trace_id: Some(trace_id.to_string()),
                details: None,
            },
            None => Self::new(code, message),
        }
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// The only way to build an internal error payload: a fixed, tagged
    /// message that never carries the underlying cause.
    #[must_use]
    pub fn internal() -> Self {
        Self::tagged(ErrorCode::InternalError, "Internal server error.")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Build a response with `status` and an optional JSON payload.
pub(crate) fn respond(status: StatusCode, payload: Option<&ApiError>) -> HttpResponse {
    let mut builder = HttpResponse::build(status);
    match payload {
        Some(payload) => {
            if let Some(id) = &payload.trace_id {
                builder.insert_header((TRACE_ID_HEADER, id.clone()));
            }
            builder.json(payload)
        }
        None => builder.finish(),
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.code.status()
    }

    fn error_response(&self) -> HttpResponse {
        respond(self.status_code(), Some(self))
    }
}

/// Render JSON body extraction failures as `invalid_request` payloads.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = req.path(), error = %err, "rejected malformed JSON body");
    ApiError::invalid_request(format!("invalid request body: {err}")).into()
}

/// Render query string extraction failures as `invalid_request` payloads.
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = req.path(), error = %err, "rejected malformed query string");
    ApiError::invalid_request(format!("invalid query parameters: {err}")).into()
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

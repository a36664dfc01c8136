//! Per-operation translation of service errors into HTTP responses.
//!
//! Each handler declares a `const` [`ErrorTable`] listing the error kinds it
//! maps. Kinds left out of the table become `500` with a redacted payload.
//! The translation matches every [`ServiceError`] variant explicitly, so a new
//! variant fails to compile here rather than silently falling through.

use actix_web::http::StatusCode;
use serde_json::json;

use super::error::{ApiError, ErrorCode};
use super::rejection::Rejection;
use crate::domain::ServiceError;

/// How much of a mapped error reaches the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    /// Status only.
    Bare,
    /// JSON payload whose message is tagged with the trace identifier.
    Message,
}

/// Declarative error mapping for one operation.
///
/// # Examples
/// ```
/// use ghc_api::inbound::http::error_table::{Body, ErrorTable};
///
/// const DELETE_ERRORS: ErrorTable = ErrorTable::new()
///     .not_found(Body::Bare)
///     .conflict(Body::Message);
/// # let _ = DELETE_ERRORS;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorTable {
    invalid_input: bool,
    not_found: Option<Body>,
    forbidden: Option<Body>,
    conflict: Option<Body>,
    precondition_failed: bool,
    unprocessable_entity: Option<Body>,
}

impl Default for ErrorTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorTable {
    /// A table that maps nothing: every service error becomes `500`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            invalid_input: false,
            not_found: None,
            forbidden: None,
            conflict: None,
            precondition_failed: false,
            unprocessable_entity: None,
        }
    }

    /// Map `InvalidInput` to `422` with field-level details.
    #[must_use]
    pub const fn invalid_input(mut self) -> Self {
        self.invalid_input = true;
        self
    }

    /// Map `NotFound` to `404`.
    #[must_use]
    pub const fn not_found(mut self, body: Body) -> Self {
        self.not_found = Some(body);
        self
    }

    /// Map `Forbidden` to `403`.
    #[must_use]
    pub const fn forbidden(mut self, body: Body) -> Self {
        self.forbidden = Some(body);
        self
    }

    /// Map `Conflict` to `409`.
    #[must_use]
    pub const fn conflict(mut self, body: Body) -> Self {
        self.conflict = Some(body);
        self
    }

    /// Map `PreconditionFailed` to `412` with a tagged message.
    #[must_use]
    pub const fn precondition_failed(mut self) -> Self {
        self.precondition_failed = true;
        self
    }

    /// Map `UnprocessableEntity` to `422`.
    #[must_use]
    pub const fn unprocessable_entity(mut self, body: Body) -> Self {
        self.unprocessable_entity = Some(body);
        self
    }

    /// Translate `err` into the rejection this operation sends.
    ///
    /// Must be called inside the audited scope so payloads pick up the
    /// request's trace identifier.
    #[must_use]
    pub fn reject(&self, err: ServiceError) -> Rejection {
        let mapped = match &err {
            ServiceError::InvalidInput {
                message,
                field_errors,
                ..
            } => self.invalid_input.then(|| {
                let payload = ApiError::tagged(
                    ErrorCode::UnprocessableEntity,
                    &format!("Invalid input: {message}"),
                )
                .with_details(json!({ "fieldErrors": field_errors }));
                (StatusCode::UNPROCESSABLE_ENTITY, Some(payload))
            }),
            ServiceError::NotFound { .. } => self.not_found.map(|body| {
                (
                    StatusCode::NOT_FOUND,
                    render(body, ErrorCode::NotFound, &err.to_string()),
                )
            }),
            ServiceError::Forbidden { message } => self.forbidden.map(|body| {
                (
                    StatusCode::FORBIDDEN,
                    render(body, ErrorCode::Forbidden, message),
                )
            }),
            ServiceError::Conflict { message, .. } => self.conflict.map(|body| {
                (
                    StatusCode::CONFLICT,
                    render(body, ErrorCode::Conflict, message),
                )
            }),
            ServiceError::PreconditionFailed { .. } => self.precondition_failed.then(|| {
                (
                    StatusCode::PRECONDITION_FAILED,
                    render(Body::Message, ErrorCode::PreconditionFailed, &err.to_string()),
                )
            }),
            ServiceError::UnprocessableEntity { message } => {
                self.unprocessable_entity.map(|body| {
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        render(body, ErrorCode::UnprocessableEntity, message),
                    )
                })
            }
            ServiceError::Query { .. } | ServiceError::Internal { .. } => None,
        };

        match mapped {
            Some((status, payload)) => Rejection::service(status, payload, err),
            None => Rejection::service(
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(ApiError::internal()),
                err,
            ),
        }
    }
}

fn render(body: Body, code: ErrorCode, message: &str) -> Option<ApiError> {
    match body {
        Body::Bare => None,
        Body::Message => Some(ApiError::tagged(code, message)),
    }
}

#[cfg(test)]
#[path = "error_table_tests.rs"]
mod tests;

//! Handler failure type.
//!
//! A [`Rejection`] pairs the HTTP status and optional payload sent to the
//! client with the cause that produced it. Actix keeps the rejection on the
//! response, so the original error travels alongside the rendered response
//! for middleware and tests to inspect.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use super::error::{ApiError, ErrorCode, respond};
use crate::domain::ServiceError;

/// What made a handler give up.
#[derive(Debug)]
pub enum Cause {
    /// A domain service returned an error.
    Service(ServiceError),
    /// The request itself was unusable (bad path, missing header, no session).
    Request(String),
    /// A gate refused the caller.
    Denied(String),
    /// A feature flag guarding the endpoint was off.
    FeatureDisabled(String),
    /// A service result could not be rendered on the wire.
    Mapping(&'static str),
    /// The handler body panicked.
    Panic(String),
}

impl Cause {
    /// Stable label recorded as `error_kind` in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Service(err) => err.kind().as_str(),
            Self::Request(_) => "request",
            Self::Denied(_) => "denied",
            Self::FeatureDisabled(_) => "feature_disabled",
            Self::Mapping(_) => "mapping",
            Self::Panic(_) => "panic",
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::Request(message) | Self::Denied(message) => f.write_str(message),
            Self::FeatureDisabled(flag) => write!(f, "feature flag {flag} is disabled"),
            Self::Mapping(entity) => write!(f, "could not map {entity} to its payload"),
            Self::Panic(message) => write!(f, "handler panicked: {message}"),
        }
    }
}

#[derive(Debug)]
struct Inner {
    status: StatusCode,
    payload: Option<ApiError>,
    cause: Cause,
}

/// Error returned by every audited handler.
#[derive(Debug)]
pub struct Rejection(Box<Inner>);

impl Rejection {
    fn build(status: StatusCode, payload: Option<ApiError>, cause: Cause) -> Self {
        Self(Box::new(Inner {
            status,
            payload,
            cause,
        }))
    }

    /// Reject with the outcome of translating a service error.
    #[must_use]
    pub fn service(status: StatusCode, payload: Option<ApiError>, err: ServiceError) -> Self {
        Self::build(status, payload, Cause::Service(err))
    }

    /// Bare `403` with an empty body.
    pub fn denied(reason: impl Into<String>) -> Self {
        Self::build(StatusCode::FORBIDDEN, None, Cause::Denied(reason.into()))
    }

    /// `403` whose message is tagged with the trace identifier.
    #[must_use]
    pub fn denied_with_message(message: &str) -> Self {
        Self::build(
            StatusCode::FORBIDDEN,
            Some(ApiError::tagged(ErrorCode::Forbidden, message)),
            Cause::Denied(message.to_owned()),
        )
    }

    /// `403` for an endpoint whose feature flag is off.
    #[must_use]
    pub fn feature_disabled(flag: &str) -> Self {
        let message = format!("Feature flag {flag} is not enabled for this user.");
        Self::build(
            StatusCode::FORBIDDEN,
            Some(ApiError::tagged(ErrorCode::Forbidden, &message)),
            Cause::FeatureDisabled(flag.to_owned()),
        )
    }

    /// `500` for a service result that cannot be rendered.
    #[must_use]
    pub fn mapping_fault(entity: &'static str) -> Self {
        Self::build(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some(ApiError::internal()),
            Cause::Mapping(entity),
        )
    }

    /// `500` for a handler body that panicked.
    #[must_use]
    pub fn panicked(message: String) -> Self {
        Self::build(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some(ApiError::internal()),
            Cause::Panic(message),
        )
    }

    /// Status sent to the client.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.0.status
    }

    /// Payload sent to the client, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&ApiError> {
        self.0.payload.as_ref()
    }

    /// Why the handler rejected the request.
    #[must_use]
    pub fn cause(&self) -> &Cause {
        &self.0.cause
    }

    /// Emit the single log record for this rejection.
    pub(crate) fn log(&self, operation: &'static str) {
        let status = self.status().as_u16();
        let kind = self.cause().kind();
        match self.cause() {
            Cause::Service(err) => {
                let root_cause = err.root_cause().map(ToString::to_string);
                error!(
                    operation,
                    status,
                    error = %err,
                    error_kind = kind,
                    root_cause = root_cause.as_deref(),
                    "service call failed"
                );
            }
            Cause::Mapping(_) | Cause::Panic(_) => {
                error!(operation, status, error = %self.cause(), error_kind = kind, "handler failed");
            }
            Cause::Request(_) | Cause::Denied(_) | Cause::FeatureDisabled(_) => {
                warn!(operation, status, error = %self.cause(), error_kind = kind, "request rejected");
            }
        }
    }
}

impl From<ApiError> for Rejection {
    fn from(payload: ApiError) -> Self {
        let cause = Cause::Request(payload.message.clone());
        Self::build(payload.code.status(), Some(payload), cause)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.cause(), self.status())
    }
}

impl ResponseError for Rejection {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        respond(self.status(), self.payload())
    }
}

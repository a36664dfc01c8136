//! Typed failures produced by domain services.
//!
//! Services report failures as a [`ServiceError`]. The enum is closed so
//! inbound adapters can translate it with an exhaustive `match`; adding a
//! kind forces every translation table to be revisited at compile time.

use std::collections::BTreeMap;
use std::error::Error as StdError;

use thiserror::Error;
use uuid::Uuid;

/// Field-level validation messages keyed by payload field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Storage-layer cause wrapped by [`ServiceError::Query`].
pub type QuerySource = Box<dyn StdError + Send + Sync + 'static>;

/// Failure returned by a domain service operation.
///
/// # Examples
/// ```
/// use ghc_api::domain::{ServiceError, ServiceErrorKind};
/// use uuid::Uuid;
///
/// let err = ServiceError::not_found("WeightTicket", Some(Uuid::nil()));
/// assert_eq!(err.kind(), ServiceErrorKind::NotFound);
/// ```
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Client-supplied data failed validation.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Identifier of the record being validated, when known.
        id: Option<Uuid>,
        /// Summary of the failure.
        message: String,
        /// Per-field messages.
        field_errors: FieldErrors,
    },
    /// The referenced record is absent or not visible to the caller.
    #[error("{}", describe_missing(.entity, .id.as_ref()))]
    NotFound {
        /// Name of the record type that was looked up.
        entity: String,
        /// Identifier that was looked up, when known.
        id: Option<Uuid>,
    },
    /// The caller is authenticated but not permitted to act.
    #[error("forbidden: {message}")]
    Forbidden {
        /// Reason the action was refused.
        message: String,
    },
    /// The operation conflicts with the current state of the record.
    #[error("conflict: {message}")]
    Conflict {
        /// Identifier of the conflicting record, when known.
        id: Option<Uuid>,
        /// Description of the conflict.
        message: String,
    },
    /// The caller's concurrency token no longer matches the stored record.
    #[error(
        "precondition failed on update to object with id {id}: the If-Match value did not match the current eTag"
    )]
    PreconditionFailed {
        /// Identifier of the record whose token was stale.
        id: Uuid,
    },
    /// The request is well-formed but semantically invalid.
    #[error("unprocessable entity: {message}")]
    UnprocessableEntity {
        /// Why the request cannot be processed.
        message: String,
    },
    /// The storage layer failed while serving the request.
    #[error("query error on {object}: {message}")]
    Query {
        /// Record type or table being queried.
        object: String,
        /// Summary of what the service was doing.
        message: String,
        /// Underlying storage error.
        #[source]
        source: QuerySource,
    },
    /// Any other failure inside the service layer.
    #[error("internal error: {message}")]
    Internal {
        /// Description for operators.
        message: String,
    },
}

fn describe_missing(entity: &str, id: Option<&Uuid>) -> String {
    match id {
        Some(id) => format!("{entity} with id {id} not found"),
        None => format!("{entity} not found"),
    }
}

/// Discriminant of [`ServiceError`] used for logging and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceErrorKind {
    /// See [`ServiceError::InvalidInput`].
    InvalidInput,
    /// See [`ServiceError::NotFound`].
    NotFound,
    /// See [`ServiceError::Forbidden`].
    Forbidden,
    /// See [`ServiceError::Conflict`].
    Conflict,
    /// See [`ServiceError::PreconditionFailed`].
    PreconditionFailed,
    /// See [`ServiceError::UnprocessableEntity`].
    UnprocessableEntity,
    /// See [`ServiceError::Query`].
    Query,
    /// See [`ServiceError::Internal`].
    Internal,
}

impl ServiceErrorKind {
    /// Stable snake-case label used in structured logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Conflict => "conflict",
            Self::PreconditionFailed => "precondition_failed",
            Self::UnprocessableEntity => "unprocessable_entity",
            Self::Query => "query",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ServiceError {
    /// Convenience constructor for [`ServiceError::InvalidInput`].
    pub fn invalid_input(
        id: Option<Uuid>,
        message: impl Into<String>,
        field_errors: FieldErrors,
    ) -> Self {
        Self::InvalidInput {
            id,
            message: message.into(),
            field_errors,
        }
    }

    /// Convenience constructor for [`ServiceError::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: Option<Uuid>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id,
        }
    }

    /// Convenience constructor for [`ServiceError::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`ServiceError::Conflict`].
    pub fn conflict(id: Option<Uuid>, message: impl Into<String>) -> Self {
        Self::Conflict {
            id,
            message: message.into(),
        }
    }

    /// Convenience constructor for [`ServiceError::PreconditionFailed`].
    #[must_use]
    pub const fn precondition_failed(id: Uuid) -> Self {
        Self::PreconditionFailed { id }
    }

    /// Convenience constructor for [`ServiceError::UnprocessableEntity`].
    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        Self::UnprocessableEntity {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`ServiceError::Query`].
    pub fn query(
        object: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<QuerySource>,
    ) -> Self {
        Self::Query {
            object: object.into(),
            message: message.into(),
            source: source.into(),
        }
    }

    /// Convenience constructor for [`ServiceError::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Discriminant of this error.
    #[must_use]
    pub const fn kind(&self) -> ServiceErrorKind {
        match self {
            Self::InvalidInput { .. } => ServiceErrorKind::InvalidInput,
            Self::NotFound { .. } => ServiceErrorKind::NotFound,
            Self::Forbidden { .. } => ServiceErrorKind::Forbidden,
            Self::Conflict { .. } => ServiceErrorKind::Conflict,
            Self::PreconditionFailed { .. } => ServiceErrorKind::PreconditionFailed,
            Self::UnprocessableEntity { .. } => ServiceErrorKind::UnprocessableEntity,
            Self::Query { .. } => ServiceErrorKind::Query,
            Self::Internal { .. } => ServiceErrorKind::Internal,
        }
    }

    /// Innermost error in the `source` chain, if this error wraps one.
    #[must_use]
    pub fn root_cause(&self) -> Option<&(dyn StdError + 'static)> {
        let mut current = self.source()?;
        while let Some(next) = current.source() {
            current = next;
        }
        Some(current)
    }
}

//! OpenAPI schema definitions for the error payload.
//!
//! [`super::error::ApiError`] stays free of utoipa derives; these wrappers
//! mirror its wire shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`super::error::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "conflict")]
    Conflict,
    #[schema(rename = "precondition_failed")]
    PreconditionFailed,
    #[schema(rename = "unprocessable_entity")]
    UnprocessableEntity,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`super::error::ApiError`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "precondition_failed")]
    code: ErrorCodeSchema,
    /// Human-readable message, suffixed with `Instance: <trace id>` when
    /// the failure should be reported to operators.
    #[schema(
        example = "precondition failed on update to object with id 1a2b3c4d-5e6f-4a7b-8c9d-0e1f2a3b4c5d Instance: 0b5f1c9e-2d3a-4e6f-8a7b-9c0d1e2f3a4b"
    )]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    trace_id: Option<String>,
    /// Structured detail such as `fieldErrors` or the offending field.
    details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    #[test]
    fn error_schema_lists_every_code() {
        let schema = serde_json::to_string(&ErrorCodeSchema::schema()).expect("schema to json");
        for code in ["invalid_request", "precondition_failed", "unprocessable_entity", "conflict"] {
            assert!(schema.contains(code), "missing {code}");
        }
    }

    #[test]
    fn error_schema_uses_camel_case_trace_id() {
        let schema = serde_json::to_string(&ErrorSchema::schema()).expect("schema to json");
        assert!(schema.contains("traceId"));
        assert_eq!(ErrorSchema::name(), "Error");
    }
}

//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns an `invalid_request` [`ApiError`] carrying the
//! offending field in `details`, so handlers can use `?` directly.

use actix_web::HttpRequest;
use actix_web::http::header::IF_MATCH;
use chrono::NaiveDate;
use pagination::{PageRequest, PageRequestError};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use uuid::Uuid;

use super::error::ApiError;
use crate::domain::{ETag, Gbloc, MoveLocator};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidLocator,
    InvalidGbloc,
    InvalidValue,
    InvalidDate,
    OutOfRange,
    InvalidBody,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidLocator => "invalid_locator",
            Self::InvalidGbloc => "invalid_gbloc",
            Self::InvalidValue => "invalid_value",
            Self::InvalidDate => "invalid_date",
            Self::OutOfRange => "out_of_range",
            Self::InvalidBody => "invalid_body",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode, value: Option<&str>) -> ApiError {
    let details = match value {
        Some(value) => json!({ "field": field.as_str(), "value": value, "code": code.as_str() }),
        None => json!({ "field": field.as_str(), "code": code.as_str() }),
    };
    ApiError::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> ApiError {
    field_error(
        field,
        format!("missing required field: {}", field.as_str()),
        ErrorCode::MissingField,
        None,
    )
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value).map_err(|_| {
        field_error(
            field,
            format!("{} must be a valid UUID", field.as_str()),
            ErrorCode::InvalidUuid,
            Some(value),
        )
    })
}

pub(crate) fn parse_locator(value: &str, field: FieldName) -> Result<MoveLocator, ApiError> {
    MoveLocator::new(value).map_err(|_| {
        field_error(
            field,
            format!("{} must be a six character move code", field.as_str()),
            ErrorCode::InvalidLocator,
            Some(value),
        )
    })
}

pub(crate) fn parse_gbloc(value: &str, field: FieldName) -> Result<Gbloc, ApiError> {
    Gbloc::new(value).map_err(|error| {
        field_error(
            field,
            format!("{}: {error}", field.as_str()),
            ErrorCode::InvalidGbloc,
            Some(value),
        )
    })
}

/// Parse one of the wire spellings of a serde-derived keyword enum.
pub(crate) fn parse_keyword<T: DeserializeOwned>(value: &str, field: FieldName) -> Result<T, ApiError> {
    serde_json::from_value(Value::String(value.to_owned())).map_err(|_| {
        field_error(
            field,
            format!("{} has an unsupported value", field.as_str()),
            ErrorCode::InvalidValue,
            Some(value),
        )
    })
}

pub(crate) fn parse_integer(value: &str, field: FieldName) -> Result<i64, ApiError> {
    value.trim().parse().map_err(|_| {
        field_error(
            field,
            format!("{} must be an integer", field.as_str()),
            ErrorCode::InvalidValue,
            Some(value),
        )
    })
}

pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        field_error(
            field,
            format!("{} must be a calendar date (YYYY-MM-DD)", field.as_str()),
            ErrorCode::InvalidDate,
            Some(value),
        )
    })
}

/// Decode a JSON request body read as raw bytes.
///
/// Handlers read bodies this way so decoding happens after the gates.
pub(crate) fn json_body<T: DeserializeOwned>(raw: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(raw).map_err(|err| {
        ApiError::invalid_request(format!("invalid request body: {err}"))
            .with_details(json!({ "code": ErrorCode::InvalidBody.as_str() }))
    })
}

/// Normalise `page` and `perPage`, rejecting out-of-range values.
pub(crate) fn page_request(page: Option<i64>, per_page: Option<i64>) -> Result<PageRequest, ApiError> {
    PageRequest::new(page, per_page).map_err(|error| {
        let (field, value) = match error {
            PageRequestError::PageOutOfRange(value) => (FieldName::new("page"), value),
            PageRequestError::PerPageOutOfRange(value) => (FieldName::new("perPage"), value),
        };
        field_error(field, error.to_string(), ErrorCode::OutOfRange, Some(&value.to_string()))
    })
}

/// Read the mandatory `If-Match` header and forward it unchanged.
pub(crate) fn if_match(req: &HttpRequest) -> Result<ETag, ApiError> {
    let field = FieldName::new("If-Match");
    let raw = req
        .headers()
        .get(IF_MATCH)
        .ok_or_else(|| missing_field_error(field))?
        .to_str()
        .map_err(|_| {
            field_error(
                field,
                "If-Match must be visible ASCII".to_owned(),
                ErrorCode::MissingField,
                None,
            )
        })?;
    ETag::new(raw).map_err(|_| missing_field_error(field))
}

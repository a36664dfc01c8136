//! Quality assurance evaluation report handlers.
//!
//! ```text
//! GET    /ghc/v1/moves/{moveId}/shipment-evaluation-reports-list
//! GET    /ghc/v1/moves/{moveId}/counseling-evaluation-reports-list
//! POST   /ghc/v1/moves/{locator}/evaluation-reports
//! GET    /ghc/v1/evaluation-reports/{reportId}
//! GET    /ghc/v1/evaluation-reports/{reportId}/download
//! PUT    /ghc/v1/evaluation-reports/{reportId}
//! DELETE /ghc/v1/evaluation-reports/{reportId}
//! POST   /ghc/v1/evaluation-reports/{reportId}/submit
//! ```

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    ETag, EvaluationReport, EvaluationReportType, EvaluationReportUpdate, InspectionLocation,
    NewEvaluationReport,
};
use crate::inbound::http::context::{AppContext, auditable};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::error_table::{Body, ErrorTable};
use crate::inbound::http::gates::{require_office_user, require_session};
use crate::inbound::http::rejection::Rejection;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, if_match, json_body, missing_field_error, parse_locator, parse_uuid,
};

const LIST_ERRORS: ErrorTable = ErrorTable::new();

const FETCH_ERRORS: ErrorTable = ErrorTable::new()
    .not_found(Body::Message)
    .forbidden(Body::Message);

const DOWNLOAD_ERRORS: ErrorTable = ErrorTable::new()
    .not_found(Body::Message)
    .forbidden(Body::Message);

const CREATE_ERRORS: ErrorTable = ErrorTable::new();

const DELETE_ERRORS: ErrorTable = ErrorTable::new();

const SAVE_ERRORS: ErrorTable = ErrorTable::new()
    .not_found(Body::Message)
    .precondition_failed()
    .forbidden(Body::Message)
    .conflict(Body::Message)
    .invalid_input();

const SUBMIT_ERRORS: ErrorTable = ErrorTable::new()
    .not_found(Body::Message)
    .precondition_failed()
    .forbidden(Body::Message)
    .invalid_input();

/// Evaluation report as returned to the office application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReportBody {
    pub id: Uuid,
    pub move_id: Uuid,
    pub shipment_id: Option<Uuid>,
    pub office_user_id: Uuid,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "SHIPMENT")]
    pub report_type: EvaluationReportType,
    pub inspection_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, example = "ORIGIN")]
    pub location: Option<InspectionLocation>,
    pub location_description: Option<String>,
    pub violations_observed: Option<bool>,
    pub remarks: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub e_tag: String,
}

/// Request body for creating a shipment evaluation report.
///
/// Omit the body entirely to create a counseling report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvaluationReportBody {
    #[schema(format = "uuid")]
    pub shipment_id: Option<String>,
}

/// Draft edits to an evaluation report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveEvaluationReportBody {
    pub inspection_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, example = "DESTINATION")]
    pub location: Option<InspectionLocation>,
    pub location_description: Option<String>,
    pub violations_observed: Option<bool>,
    pub remarks: Option<String>,
}

pub(crate) fn evaluation_report_body(report: EvaluationReport) -> Option<EvaluationReportBody> {
    if report.id.is_nil() {
        return None;
    }
    Some(EvaluationReportBody {
        e_tag: ETag::for_timestamp(report.updated_at).to_string(),
        id: report.id,
        move_id: report.move_id,
        shipment_id: report.shipment_id,
        office_user_id: report.office_user_id,
        report_type: report.report_type,
        inspection_date: report.inspection_date,
        location: report.location,
        location_description: report.location_description,
        violations_observed: report.violations_observed,
        remarks: report.remarks,
        submitted_at: report.submitted_at,
        created_at: report.created_at,
        updated_at: report.updated_at,
    })
}

/// Decide the report type from the optional create body.
fn new_report(raw: &[u8], office_user_id: Option<Uuid>) -> Result<NewEvaluationReport, ApiError> {
    let (report_type, shipment_id) = if raw.iter().all(u8::is_ascii_whitespace) {
        (EvaluationReportType::Counseling, None)
    } else {
        let body: CreateEvaluationReportBody = json_body(raw)?;
        let field = FieldName::new("shipmentId");
        let raw_id = body.shipment_id.ok_or_else(|| missing_field_error(field))?;
        (
            EvaluationReportType::Shipment,
            Some(parse_uuid(&raw_id, field)?),
        )
    };
    Ok(NewEvaluationReport {
        id: Uuid::new_v4(),
        report_type,
        shipment_id,
        office_user_id,
    })
}

async fn list_reports(
    operation: &'static str,
    state: web::Data<HttpState>,
    ctx: AppContext,
    raw_move_id: String,
    report_type: EvaluationReportType,
) -> Result<HttpResponse, Rejection> {
    auditable(operation, ctx, |request| async move {
        require_office_user(require_session(&request)?)?;
        let move_id = parse_uuid(&raw_move_id, FieldName::new("moveId"))?;

        let reports = state
            .report_fetcher
            .list_for_move(&request, move_id, report_type)
            .await
            .map_err(|err| LIST_ERRORS.reject(err))?;
        let body = reports
            .into_iter()
            .map(evaluation_report_body)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Rejection::mapping_fault("EvaluationReport"))?;
        Ok(HttpResponse::Ok().json(body))
    })
    .await
}

/// List shipment evaluation reports on a move.
#[utoipa::path(
    get,
    path = "/ghc/v1/moves/{moveId}/shipment-evaluation-reports-list",
    params(("moveId" = String, Path, description = "Move id")),
    responses(
        (status = 200, description = "Shipment evaluation reports", body = [EvaluationReportBody]),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Not an office user"),
        (status = 500, description = "Internal error", body = ErrorSchema)
    ),
    tags = ["evaluation-reports"],
    operation_id = "getShipmentEvaluationReportsList",
    security(("SessionCookie" = []))
)]
#[get("/moves/{moveId}/shipment-evaluation-reports-list")]
pub async fn list_shipment_evaluation_reports(
    state: web::Data<HttpState>,
    ctx: AppContext,
    path: web::Path<String>,
) -> Result<HttpResponse, Rejection> {
    list_reports(
        "list_shipment_evaluation_reports",
        state,
        ctx,
        path.into_inner(),
        EvaluationReportType::Shipment,
    )
    .await
}

/// List counseling evaluation reports on a move.
#[utoipa::path(
    get,
    path = "/ghc/v1/moves/{moveId}/counseling-evaluation-reports-list",
    params(("moveId" = String, Path, description = "Move id")),
    responses(
        (status = 200, description = "Counseling evaluation reports", body = [EvaluationReportBody]),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Not an office user"),
        (status = 500, description = "Internal error", body = ErrorSchema)
    ),
    tags = ["evaluation-reports"],
    operation_id = "getCounselingEvaluationReportsList",
    security(("SessionCookie" = []))
)]
#[get("/moves/{moveId}/counseling-evaluation-reports-list")]
pub async fn list_counseling_evaluation_reports(
    state: web::Data<HttpState>,
    ctx: AppContext,
    path: web::Path<String>,
) -> Result<HttpResponse, Rejection> {
    list_reports(
        "list_counseling_evaluation_reports",
        state,
        ctx,
        path.into_inner(),
        EvaluationReportType::Counseling,
    )
    .await
}

/// Fetch one evaluation report.
#[utoipa::path(
    get,
    path = "/ghc/v1/evaluation-reports/{reportId}",
    params(("reportId" = String, Path, description = "Evaluation report id")),
    responses(
        (status = 200, description = "Evaluation report", body = EvaluationReportBody),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Not permitted", body = ErrorSchema),
        (status = 404, description = "Report not found", body = ErrorSchema),
        (status = 500, description = "Internal error", body = ErrorSchema)
    ),
    tags = ["evaluation-reports"],
    operation_id = "getEvaluationReport",
    security(("SessionCookie" = []))
)]
#[get("/evaluation-reports/{reportId}")]
pub async fn get_evaluation_report(
    state: web::Data<HttpState>,
    ctx: AppContext,
    path: web::Path<String>,
) -> Result<HttpResponse, Rejection> {
    auditable("get_evaluation_report", ctx, |request| async move {
        require_session(&request)?;
        let report_id = parse_uuid(&path, FieldName::new("reportId"))?;

        let report = state
            .report_fetcher
            .fetch(&request, report_id)
            .await
            .map_err(|err| FETCH_ERRORS.reject(err))?;
        let body = evaluation_report_body(report)
            .ok_or_else(|| Rejection::mapping_fault("EvaluationReport"))?;
        Ok(HttpResponse::Ok().json(body))
    })
    .await
}

/// Download an evaluation report as a PDF.
#[utoipa::path(
    get,
    path = "/ghc/v1/evaluation-reports/{reportId}/download",
    params(("reportId" = String, Path, description = "Evaluation report id")),
    responses(
        (status = 200, description = "Report PDF", content_type = "application/pdf", body = Vec<u8>),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Not permitted", body = ErrorSchema),
        (status = 404, description = "Report or its orders not found", body = ErrorSchema),
        (status = 500, description = "Internal error", body = ErrorSchema)
    ),
    tags = ["evaluation-reports"],
    operation_id = "downloadEvaluationReport",
    security(("SessionCookie" = []))
)]
#[get("/evaluation-reports/{reportId}/download")]
pub async fn download_evaluation_report(
    state: web::Data<HttpState>,
    ctx: AppContext,
    path: web::Path<String>,
) -> Result<HttpResponse, Rejection> {
    auditable("download_evaluation_report", ctx, |request| async move {
        require_session(&request)?;
        let report_id = parse_uuid(&path, FieldName::new("reportId"))?;

        let document = state
            .report_renderer
            .render(&request, report_id)
            .await
            .map_err(|err| DOWNLOAD_ERRORS.reject(err))?;
        Ok(HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Inline,
                parameters: vec![DispositionParam::Filename(document.file_name)],
            })
            .body(document.pdf))
    })
    .await
}

/// Create a draft evaluation report on a move.
///
/// A body naming `shipmentId` creates a shipment report; no body creates a
/// counseling report.
#[utoipa::path(
    post,
    path = "/ghc/v1/moves/{locator}/evaluation-reports",
    params(("locator" = String, Path, description = "Move code")),
    request_body(content = CreateEvaluationReportBody, description = "Shipment to evaluate; omit for a counseling report"),
    responses(
        (status = 200, description = "Draft report created", body = EvaluationReportBody),
        (status = 400, description = "Malformed locator or body", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 500, description = "Internal error", body = ErrorSchema)
    ),
    tags = ["evaluation-reports"],
    operation_id = "createEvaluationReport",
    security(("SessionCookie" = []))
)]
#[post("/moves/{locator}/evaluation-reports")]
pub async fn create_evaluation_report(
    state: web::Data<HttpState>,
    ctx: AppContext,
    path: web::Path<String>,
    payload: web::Bytes,
) -> Result<HttpResponse, Rejection> {
    auditable("create_evaluation_report", ctx, |request| async move {
        let session = require_session(&request)?;
        let locator = parse_locator(&path, FieldName::new("locator"))?;
        let report = new_report(&payload, session.office_user_id)?;

        let created = state
            .report_creator
            .create(&request, report, locator)
            .await
            .map_err(|err| CREATE_ERRORS.reject(err))?;
        let body = evaluation_report_body(created)
            .ok_or_else(|| Rejection::mapping_fault("EvaluationReport"))?;
        Ok(HttpResponse::Ok().json(body))
    })
    .await
}

/// Delete a draft evaluation report.
#[utoipa::path(
    delete,
    path = "/ghc/v1/evaluation-reports/{reportId}",
    params(("reportId" = String, Path, description = "Evaluation report id")),
    responses(
        (status = 204, description = "Report deleted"),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 500, description = "Internal error", body = ErrorSchema)
    ),
    tags = ["evaluation-reports"],
    operation_id = "deleteEvaluationReport",
    security(("SessionCookie" = []))
)]
#[delete("/evaluation-reports/{reportId}")]
pub async fn delete_evaluation_report(
    state: web::Data<HttpState>,
    ctx: AppContext,
    path: web::Path<String>,
) -> Result<HttpResponse, Rejection> {
    auditable("delete_evaluation_report", ctx, |request| async move {
        require_session(&request)?;
        let report_id = parse_uuid(&path, FieldName::new("reportId"))?;

        state
            .report_deleter
            .delete(&request, report_id)
            .await
            .map_err(|err| DELETE_ERRORS.reject(err))?;
        Ok(HttpResponse::NoContent().finish())
    })
    .await
}

/// Save edits to a draft evaluation report.
#[utoipa::path(
    put,
    path = "/ghc/v1/evaluation-reports/{reportId}",
    params(
        ("reportId" = String, Path, description = "Evaluation report id"),
        ("If-Match" = String, Header, description = "eTag of the version being edited")
    ),
    request_body = SaveEvaluationReportBody,
    responses(
        (status = 204, description = "Draft saved"),
        (status = 400, description = "Malformed id or missing If-Match", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Not permitted", body = ErrorSchema),
        (status = 404, description = "Report not found", body = ErrorSchema),
        (status = 409, description = "Report already submitted", body = ErrorSchema),
        (status = 412, description = "Stale If-Match", body = ErrorSchema),
        (status = 422, description = "Invalid input", body = ErrorSchema),
        (status = 500, description = "Internal error", body = ErrorSchema)
    ),
    tags = ["evaluation-reports"],
    operation_id = "saveEvaluationReport",
    security(("SessionCookie" = []))
)]
#[put("/evaluation-reports/{reportId}")]
pub async fn save_evaluation_report(
    state: web::Data<HttpState>,
    ctx: AppContext,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Bytes,
) -> Result<HttpResponse, Rejection> {
    auditable("save_evaluation_report", ctx, |request| async move {
        let session = require_session(&request)?;
        let report_id = parse_uuid(&path, FieldName::new("reportId"))?;
        let tag = if_match(&req)?;

        let body: SaveEvaluationReportBody = json_body(&payload)?;
        let update = EvaluationReportUpdate {
            id: report_id,
            office_user_id: session.office_user_id,
            inspection_date: body.inspection_date,
            location: body.location,
            location_description: body.location_description,
            violations_observed: body.violations_observed,
            remarks: body.remarks,
        };
        state
            .report_updater
            .save(&request, update, tag)
            .await
            .map_err(|err| SAVE_ERRORS.reject(err))?;
        Ok(HttpResponse::NoContent().finish())
    })
    .await
}

/// Submit a draft evaluation report, making it read-only.
#[utoipa::path(
    post,
    path = "/ghc/v1/evaluation-reports/{reportId}/submit",
    params(
        ("reportId" = String, Path, description = "Evaluation report id"),
        ("If-Match" = String, Header, description = "eTag of the version being submitted")
    ),
    responses(
        (status = 204, description = "Report submitted"),
        (status = 400, description = "Malformed id or missing If-Match", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Not permitted", body = ErrorSchema),
        (status = 404, description = "Report not found", body = ErrorSchema),
        (status = 412, description = "Stale If-Match", body = ErrorSchema),
        (status = 422, description = "Report incomplete", body = ErrorSchema),
        (status = 500, description = "Internal error", body = ErrorSchema)
    ),
    tags = ["evaluation-reports"],
    operation_id = "submitEvaluationReport",
    security(("SessionCookie" = []))
)]
#[post("/evaluation-reports/{reportId}/submit")]
pub async fn submit_evaluation_report(
    state: web::Data<HttpState>,
    ctx: AppContext,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, Rejection> {
    auditable("submit_evaluation_report", ctx, |request| async move {
        let session = require_session(&request)?;
        let report_id = parse_uuid(&path, FieldName::new("reportId"))?;
        let tag = if_match(&req)?;

        state
            .report_updater
            .submit(&request, report_id, session.office_user_id, tag)
            .await
            .map_err(|err| SUBMIT_ERRORS.reject(err))?;
        Ok(HttpResponse::NoContent().finish())
    })
    .await
}

#[cfg(test)]
#[path = "evaluation_reports_tests.rs"]
mod tests;

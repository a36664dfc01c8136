//! Weight ticket handlers for the office application.
//!
//! ```text
//! GET    /ghc/v1/ppm-shipments/{ppmShipmentId}/weight-tickets
//! PATCH  /ghc/v1/ppm-shipments/{ppmShipmentId}/weight-tickets/{weightTicketId}
//! DELETE /ghc/v1/ppm-shipments/{ppmShipmentId}/weight-tickets/{weightTicketId}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{ETag, PpmDocumentStatus, WeightTicket, WeightTicketUpdate};
use crate::inbound::http::context::{AppContext, auditable};
use crate::inbound::http::error_table::{Body, ErrorTable};
use crate::inbound::http::gates::{require_office_app, require_session};
use crate::inbound::http::rejection::Rejection;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, if_match, json_body, parse_uuid};

const LIST_ERRORS: ErrorTable = ErrorTable::new().not_found(Body::Bare);

const UPDATE_ERRORS: ErrorTable = ErrorTable::new()
    .not_found(Body::Bare)
    .precondition_failed()
    .invalid_input();

const DELETE_ERRORS: ErrorTable = ErrorTable::new()
    .not_found(Body::Bare)
    .forbidden(Body::Bare)
    .conflict(Body::Message);

/// Weight ticket as returned to the office application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeightTicketBody {
    pub id: Uuid,
    pub ppm_shipment_id: Uuid,
    pub vehicle_description: Option<String>,
    pub empty_weight: Option<u32>,
    pub full_weight: Option<u32>,
    pub owns_trailer: bool,
    pub trailer_meets_criteria: bool,
    pub adjusted_net_weight: Option<u32>,
    pub net_weight_remarks: Option<String>,
    #[schema(value_type = Option<String>, example = "APPROVED")]
    pub status: Option<PpmDocumentStatus>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub e_tag: String,
}

/// Office review of a weight ticket.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWeightTicketBody {
    pub empty_weight: Option<u32>,
    pub full_weight: Option<u32>,
    pub owns_trailer: Option<bool>,
    pub trailer_meets_criteria: Option<bool>,
    pub adjusted_net_weight: Option<u32>,
    pub net_weight_remarks: Option<String>,
    #[schema(value_type = Option<String>, example = "EXCLUDED")]
    pub status: Option<PpmDocumentStatus>,
    pub reason: Option<String>,
}

pub(crate) fn weight_ticket_body(ticket: WeightTicket) -> Option<WeightTicketBody> {
    if ticket.id.is_nil() {
        return None;
    }
    Some(WeightTicketBody {
        e_tag: ETag::for_timestamp(ticket.updated_at).to_string(),
        id: ticket.id,
        ppm_shipment_id: ticket.ppm_shipment_id,
        vehicle_description: ticket.vehicle_description,
        empty_weight: ticket.empty_weight,
        full_weight: ticket.full_weight,
        owns_trailer: ticket.owns_trailer,
        trailer_meets_criteria: ticket.trailer_meets_criteria,
        adjusted_net_weight: ticket.adjusted_net_weight,
        net_weight_remarks: ticket.net_weight_remarks,
        status: ticket.status,
        reason: ticket.reason,
        created_at: ticket.created_at,
        updated_at: ticket.updated_at,
    })
}

/// List the weight tickets on a PPM shipment.
#[utoipa::path(
    get,
    path = "/ghc/v1/ppm-shipments/{ppmShipmentId}/weight-tickets",
    params(("ppmShipmentId" = String, Path, description = "PPM shipment id")),
    responses(
        (status = 200, description = "Weight tickets", body = [WeightTicketBody]),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Not the office app", body = ErrorSchema),
        (status = 404, description = "Shipment not found"),
        (status = 500, description = "Internal error", body = ErrorSchema)
    ),
    tags = ["ppm"],
    operation_id = "listWeightTickets",
    security(("SessionCookie" = []))
)]
#[get("/ppm-shipments/{ppmShipmentId}/weight-tickets")]
pub async fn list_weight_tickets(
    state: web::Data<HttpState>,
    ctx: AppContext,
    path: web::Path<String>,
) -> Result<HttpResponse, Rejection> {
    auditable("list_weight_tickets", ctx, |request| async move {
        require_office_app(require_session(&request)?)?;
        let ppm_shipment_id = parse_uuid(&path, FieldName::new("ppmShipmentId"))?;

        let tickets = state
            .weight_ticket_fetcher
            .list_for_shipment(&request, ppm_shipment_id)
            .await
            .map_err(|err| LIST_ERRORS.reject(err))?;
        let body = tickets
            .into_iter()
            .map(weight_ticket_body)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Rejection::mapping_fault("WeightTicket"))?;
        Ok(HttpResponse::Ok().json(body))
    })
    .await
}

/// Record the office review of a weight ticket.
#[utoipa::path(
    patch,
    path = "/ghc/v1/ppm-shipments/{ppmShipmentId}/weight-tickets/{weightTicketId}",
    params(
        ("ppmShipmentId" = String, Path, description = "PPM shipment id"),
        ("weightTicketId" = String, Path, description = "Weight ticket id"),
        ("If-Match" = String, Header, description = "eTag of the version being edited")
    ),
    request_body = UpdateWeightTicketBody,
    responses(
        (status = 200, description = "Weight ticket updated", body = WeightTicketBody),
        (status = 400, description = "Malformed id or missing If-Match", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Not the office app", body = ErrorSchema),
        (status = 404, description = "Weight ticket not found"),
        (status = 412, description = "Stale If-Match", body = ErrorSchema),
        (status = 422, description = "Invalid input", body = ErrorSchema),
        (status = 500, description = "Internal error", body = ErrorSchema)
    ),
    tags = ["ppm"],
    operation_id = "updateWeightTicket",
    security(("SessionCookie" = []))
)]
#[patch("/ppm-shipments/{ppmShipmentId}/weight-tickets/{weightTicketId}")]
pub async fn update_weight_ticket(
    state: web::Data<HttpState>,
    ctx: AppContext,
    req: HttpRequest,
    path: web::Path<(String, String)>,
    payload: web::Bytes,
) -> Result<HttpResponse, Rejection> {
    auditable("update_weight_ticket", ctx, |request| async move {
        require_office_app(require_session(&request)?)?;
        let (raw_shipment_id, raw_ticket_id) = path.into_inner();
        let ppm_shipment_id = parse_uuid(&raw_shipment_id, FieldName::new("ppmShipmentId"))?;
        let id = parse_uuid(&raw_ticket_id, FieldName::new("weightTicketId"))?;
        let tag = if_match(&req)?;

        let body: UpdateWeightTicketBody = json_body(&payload)?;
        let update = WeightTicketUpdate {
            id,
            ppm_shipment_id,
            empty_weight: body.empty_weight,
            full_weight: body.full_weight,
            owns_trailer: body.owns_trailer,
            trailer_meets_criteria: body.trailer_meets_criteria,
            adjusted_net_weight: body.adjusted_net_weight,
            net_weight_remarks: body.net_weight_remarks,
            status: body.status,
            reason: body.reason,
        };
        let ticket = state
            .weight_ticket_updater
            .update(&request, update, tag)
            .await
            .map_err(|err| UPDATE_ERRORS.reject(err))?;
        let body =
            weight_ticket_body(ticket).ok_or_else(|| Rejection::mapping_fault("WeightTicket"))?;
        Ok(HttpResponse::Ok().json(body))
    })
    .await
}

/// Soft-delete a weight ticket.
#[utoipa::path(
    delete,
    path = "/ghc/v1/ppm-shipments/{ppmShipmentId}/weight-tickets/{weightTicketId}",
    params(
        ("ppmShipmentId" = String, Path, description = "PPM shipment id"),
        ("weightTicketId" = String, Path, description = "Weight ticket id")
    ),
    responses(
        (status = 204, description = "Weight ticket deleted"),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Not permitted"),
        (status = 404, description = "Weight ticket not found"),
        (status = 409, description = "Weight ticket cannot be deleted", body = ErrorSchema),
        (status = 500, description = "Internal error", body = ErrorSchema)
    ),
    tags = ["ppm"],
    operation_id = "deleteWeightTicket",
    security(("SessionCookie" = []))
)]
#[delete("/ppm-shipments/{ppmShipmentId}/weight-tickets/{weightTicketId}")]
pub async fn delete_weight_ticket(
    state: web::Data<HttpState>,
    ctx: AppContext,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, Rejection> {
    auditable("delete_weight_ticket", ctx, |request| async move {
        require_office_app(require_session(&request)?)?;
        let (raw_shipment_id, raw_ticket_id) = path.into_inner();
        let ppm_shipment_id = parse_uuid(&raw_shipment_id, FieldName::new("ppmShipmentId"))?;
        let ticket_id = parse_uuid(&raw_ticket_id, FieldName::new("weightTicketId"))?;

        state
            .weight_ticket_deleter
            .delete(&request, ppm_shipment_id, ticket_id)
            .await
            .map_err(|err| DELETE_ERRORS.reject(err))?;
        Ok(HttpResponse::NoContent().finish())
    })
    .await
}

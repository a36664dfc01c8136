//! Gun safe weight ticket handlers for the office application.
//!
//! ```text
//! POST   /ghc/v1/ppm-shipments/{ppmShipmentId}/gun-safe-weight-tickets
//! PATCH  /ghc/v1/ppm-shipments/{ppmShipmentId}/gun-safe-weight-tickets/{gunSafeWeightTicketId}
//! DELETE /ghc/v1/ppm-shipments/{ppmShipmentId}/gun-safe-weight-tickets/{gunSafeWeightTicketId}
//! ```
//!
//! Every route is gated on the `gun_safe` feature flag.

use actix_web::{HttpRequest, HttpResponse, delete, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    ETag, GUN_SAFE_FLAG, GunSafeWeightTicket, GunSafeWeightTicketUpdate, PpmDocumentStatus,
};
use crate::inbound::http::context::{AppContext, auditable};
use crate::inbound::http::error_table::{Body, ErrorTable};
use crate::inbound::http::gates::{require_flag, require_office_app, require_session};
use crate::inbound::http::rejection::Rejection;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, if_match, json_body, parse_uuid};

const CREATE_ERRORS: ErrorTable = ErrorTable::new()
    .not_found(Body::Bare)
    .forbidden(Body::Message)
    .invalid_input();

const UPDATE_ERRORS: ErrorTable = ErrorTable::new()
    .not_found(Body::Bare)
    .precondition_failed()
    .invalid_input()
    .forbidden(Body::Message);

const DELETE_ERRORS: ErrorTable = ErrorTable::new()
    .not_found(Body::Bare)
    .forbidden(Body::Bare)
    .conflict(Body::Message);

/// Gun safe weight ticket as returned to the office application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GunSafeWeightTicketBody {
    pub id: Uuid,
    pub ppm_shipment_id: Uuid,
    pub document_id: Uuid,
    pub description: Option<String>,
    pub weight: Option<u32>,
    pub has_weight_tickets: Option<bool>,
    #[schema(value_type = Option<String>, example = "APPROVED")]
    pub status: Option<PpmDocumentStatus>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Token to send back as `If-Match` on the next update.
    pub e_tag: String,
}

/// Office edits to a gun safe weight ticket. Absent fields are left as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGunSafeWeightTicketBody {
    pub description: Option<String>,
    pub weight: Option<u32>,
    pub has_weight_tickets: Option<bool>,
    #[schema(value_type = Option<String>, example = "REJECTED")]
    pub status: Option<PpmDocumentStatus>,
    pub reason: Option<String>,
}

/// Render a ticket; `None` when the record lacks an identity.
pub(crate) fn gun_safe_weight_ticket_body(
    ticket: GunSafeWeightTicket,
) -> Option<GunSafeWeightTicketBody> {
    if ticket.id.is_nil() {
        return None;
    }
    Some(GunSafeWeightTicketBody {
        e_tag: ETag::for_timestamp(ticket.updated_at).to_string(),
        id: ticket.id,
        ppm_shipment_id: ticket.ppm_shipment_id,
        document_id: ticket.document_id,
        description: ticket.description,
        weight: ticket.weight,
        has_weight_tickets: ticket.has_weight_tickets,
        status: ticket.status,
        reason: ticket.reason,
        created_at: ticket.created_at,
        updated_at: ticket.updated_at,
    })
}

/// Create an empty gun safe weight ticket on a PPM shipment.
#[utoipa::path(
    post,
    path = "/ghc/v1/ppm-shipments/{ppmShipmentId}/gun-safe-weight-tickets",
    params(("ppmShipmentId" = String, Path, description = "PPM shipment id")),
    responses(
        (status = 201, description = "Ticket created", body = GunSafeWeightTicketBody),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Flag off or not permitted", body = ErrorSchema),
        (status = 404, description = "Shipment not found"),
        (status = 422, description = "Invalid input", body = ErrorSchema),
        (status = 500, description = "Internal error", body = ErrorSchema)
    ),
    tags = ["ppm"],
    operation_id = "createGunSafeWeightTicket",
    security(("SessionCookie" = []))
)]
#[post("/ppm-shipments/{ppmShipmentId}/gun-safe-weight-tickets")]
pub async fn create_gun_safe_weight_ticket(
    state: web::Data<HttpState>,
    ctx: AppContext,
    path: web::Path<String>,
) -> Result<HttpResponse, Rejection> {
    auditable("create_gun_safe_weight_ticket", ctx, |request| async move {
        require_flag(state.flags.as_ref(), &request, GUN_SAFE_FLAG).await?;
        require_office_app(require_session(&request)?)?;
        let ppm_shipment_id = parse_uuid(&path, FieldName::new("ppmShipmentId"))?;

        let ticket = state
            .gun_safe_creator
            .create(&request, ppm_shipment_id)
            .await
            .map_err(|err| CREATE_ERRORS.reject(err))?;
        let body = gun_safe_weight_ticket_body(ticket)
            .ok_or_else(|| Rejection::mapping_fault("GunSafeWeightTicket"))?;
        Ok(HttpResponse::Created().json(body))
    })
    .await
}

/// Apply office edits to a gun safe weight ticket.
#[utoipa::path(
    patch,
    path = "/ghc/v1/ppm-shipments/{ppmShipmentId}/gun-safe-weight-tickets/{gunSafeWeightTicketId}",
    params(
        ("ppmShipmentId" = String, Path, description = "PPM shipment id"),
        ("gunSafeWeightTicketId" = String, Path, description = "Ticket id"),
        ("If-Match" = String, Header, description = "eTag of the version being edited")
    ),
    request_body = UpdateGunSafeWeightTicketBody,
    responses(
        (status = 200, description = "Ticket updated", body = GunSafeWeightTicketBody),
        (status = 400, description = "Malformed id or missing If-Match", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Flag off or not permitted", body = ErrorSchema),
        (status = 404, description = "Ticket not found"),
        (status = 412, description = "Stale If-Match", body = ErrorSchema),
        (status = 422, description = "Invalid input", body = ErrorSchema),
        (status = 500, description = "Internal error", body = ErrorSchema)
    ),
    tags = ["ppm"],
    operation_id = "updateGunSafeWeightTicket",
    security(("SessionCookie" = []))
)]
#[patch("/ppm-shipments/{ppmShipmentId}/gun-safe-weight-tickets/{gunSafeWeightTicketId}")]
pub async fn update_gun_safe_weight_ticket(
    state: web::Data<HttpState>,
    ctx: AppContext,
    req: HttpRequest,
    path: web::Path<(String, String)>,
    payload: web::Bytes,
) -> Result<HttpResponse, Rejection> {
    auditable("update_gun_safe_weight_ticket", ctx, |request| async move {
        require_flag(state.flags.as_ref(), &request, GUN_SAFE_FLAG).await?;
        require_office_app(require_session(&request)?)?;
        let (raw_shipment_id, raw_ticket_id) = path.into_inner();
        let ppm_shipment_id = parse_uuid(&raw_shipment_id, FieldName::new("ppmShipmentId"))?;
        let id = parse_uuid(&raw_ticket_id, FieldName::new("gunSafeWeightTicketId"))?;
        let tag = if_match(&req)?;

        let body: UpdateGunSafeWeightTicketBody = json_body(&payload)?;
        let update = GunSafeWeightTicketUpdate {
            id,
            ppm_shipment_id,
            description: body.description,
            weight: body.weight,
            has_weight_tickets: body.has_weight_tickets,
            status: body.status,
            reason: body.reason,
        };
        let ticket = state
            .gun_safe_updater
            .update(&request, update, tag)
            .await
            .map_err(|err| UPDATE_ERRORS.reject(err))?;
        let body = gun_safe_weight_ticket_body(ticket)
            .ok_or_else(|| Rejection::mapping_fault("GunSafeWeightTicket"))?;
        Ok(HttpResponse::Ok().json(body))
    })
    .await
}

/// Soft-delete a gun safe weight ticket.
#[utoipa::path(
    delete,
    path = "/ghc/v1/ppm-shipments/{ppmShipmentId}/gun-safe-weight-tickets/{gunSafeWeightTicketId}",
    params(
        ("ppmShipmentId" = String, Path, description = "PPM shipment id"),
        ("gunSafeWeightTicketId" = String, Path, description = "Ticket id")
    ),
    responses(
        (status = 204, description = "Ticket deleted"),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Flag off or not permitted"),
        (status = 404, description = "Ticket not found"),
        (status = 409, description = "Ticket cannot be deleted", body = ErrorSchema),
        (status = 500, description = "Internal error", body = ErrorSchema)
    ),
    tags = ["ppm"],
    operation_id = "deleteGunSafeWeightTicket",
    security(("SessionCookie" = []))
)]
#[delete("/ppm-shipments/{ppmShipmentId}/gun-safe-weight-tickets/{gunSafeWeightTicketId}")]
pub async fn delete_gun_safe_weight_ticket(
    state: web::Data<HttpState>,
    ctx: AppContext,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, Rejection> {
    auditable("delete_gun_safe_weight_ticket", ctx, |request| async move {
        require_flag(state.flags.as_ref(), &request, GUN_SAFE_FLAG).await?;
        require_office_app(require_session(&request)?)?;
        let (raw_shipment_id, raw_ticket_id) = path.into_inner();
        let ppm_shipment_id = parse_uuid(&raw_shipment_id, FieldName::new("ppmShipmentId"))?;
        let ticket_id = parse_uuid(&raw_ticket_id, FieldName::new("gunSafeWeightTicketId"))?;

        state
            .gun_safe_deleter
            .delete(&request, ppm_shipment_id, ticket_id)
            .await
            .map_err(|err| DELETE_ERRORS.reject(err))?;
        Ok(HttpResponse::NoContent().finish())
    })
    .await
}

#[cfg(test)]
#[path = "gun_safe_weight_tickets_tests.rs"]
mod tests;

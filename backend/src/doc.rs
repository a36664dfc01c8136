//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every GHC endpoint, the health probes, the wire body
//! schemas, and the session cookie security scheme. The document is served
//! by Swagger UI in debug builds and exported by the `openapi-dump` binary.

use crate::inbound::http::evaluation_reports::{
    CreateEvaluationReportBody, EvaluationReportBody, SaveEvaluationReportBody,
};
use crate::inbound::http::gun_safe_weight_tickets::{
    GunSafeWeightTicketBody, UpdateGunSafeWeightTicketBody,
};
use crate::inbound::http::queues::{
    QueueCustomerBody, QueueMoveBody, QueueMovesResult, QueuePaymentRequestBody,
    QueuePaymentRequestsResult,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::weight_tickets::{UpdateWeightTicketBody, WeightTicketBody};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie carrying the caller's office or customer session.",
            ))),
        );
    }
}

/// OpenAPI document for the GHC API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "GHC API",
        description = "Office-facing HTTP interface for PPM weight tickets, evaluation reports, and work queues."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::gun_safe_weight_tickets::create_gun_safe_weight_ticket,
        crate::inbound::http::gun_safe_weight_tickets::update_gun_safe_weight_ticket,
        crate::inbound::http::gun_safe_weight_tickets::delete_gun_safe_weight_ticket,
        crate::inbound::http::weight_tickets::list_weight_tickets,
        crate::inbound::http::weight_tickets::update_weight_ticket,
        crate::inbound::http::weight_tickets::delete_weight_ticket,
        crate::inbound::http::evaluation_reports::list_shipment_evaluation_reports,
        crate::inbound::http::evaluation_reports::list_counseling_evaluation_reports,
        crate::inbound::http::evaluation_reports::get_evaluation_report,
        crate::inbound::http::evaluation_reports::download_evaluation_report,
        crate::inbound::http::evaluation_reports::create_evaluation_report,
        crate::inbound::http::evaluation_reports::delete_evaluation_report,
        crate::inbound::http::evaluation_reports::save_evaluation_report,
        crate::inbound::http::evaluation_reports::submit_evaluation_report,
        crate::inbound::http::queues::get_moves_queue,
        crate::inbound::http::queues::get_payment_requests_queue,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        GunSafeWeightTicketBody,
        UpdateGunSafeWeightTicketBody,
        WeightTicketBody,
        UpdateWeightTicketBody,
        EvaluationReportBody,
        CreateEvaluationReportBody,
        SaveEvaluationReportBody,
        QueueCustomerBody,
        QueueMoveBody,
        QueuePaymentRequestBody,
        QueueMovesResult,
        QueuePaymentRequestsResult,
    )),
    tags(
        (name = "ppm", description = "Weight tickets recorded against PPM shipments"),
        (name = "evaluation-reports", description = "Quality assurance evaluation reports"),
        (name = "queues", description = "Office work queues"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

//! HTTP inbound adapter exposing the GHC REST endpoints.
//!
//! Handlers share one shape: extract an [`AppContext`], run the body inside
//! [`auditable`], pass the gates, call one service port, and translate its
//! failure through the operation's [`error_table::ErrorTable`].

pub mod context;
pub mod error;
pub mod error_table;
pub mod evaluation_reports;
pub(crate) mod gates;
pub mod gun_safe_weight_tickets;
pub mod health;
pub mod queues;
pub mod rejection;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub(crate) mod validation;
pub mod weight_tickets;

use actix_web::web;

pub use context::{AppContext, auditable};
pub use error::{ApiError, ErrorCode};
pub use rejection::Rejection;

/// Base path shared by every GHC endpoint.
pub const API_BASE: &str = "/ghc/v1";

/// Register the GHC scope and the extractor error handlers.
///
/// The caller provides `web::Data<HttpState>` and the session middleware.
///
/// # Examples
/// ```
/// use actix_web::App;
///
/// let app = App::new().configure(ghc_api::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(
            web::scope(API_BASE)
                .service(gun_safe_weight_tickets::create_gun_safe_weight_ticket)
                .service(gun_safe_weight_tickets::update_gun_safe_weight_ticket)
                .service(gun_safe_weight_tickets::delete_gun_safe_weight_ticket)
                .service(weight_tickets::list_weight_tickets)
                .service(weight_tickets::update_weight_ticket)
                .service(weight_tickets::delete_weight_ticket)
                .service(evaluation_reports::list_shipment_evaluation_reports)
                .service(evaluation_reports::list_counseling_evaluation_reports)
                .service(evaluation_reports::get_evaluation_report)
                .service(evaluation_reports::download_evaluation_report)
                .service(evaluation_reports::create_evaluation_report)
                .service(evaluation_reports::delete_evaluation_report)
                .service(evaluation_reports::save_evaluation_report)
                .service(evaluation_reports::submit_evaluation_report)
                .service(queues::get_moves_queue)
                .service(queues::get_payment_requests_queue),
        );
}

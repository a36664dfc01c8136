//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    EvaluationReportCreator, EvaluationReportDeleter, EvaluationReportFetcher,
    EvaluationReportRenderer, EvaluationReportUpdater, FeatureFlagFetcher,
    FixtureEvaluationReports, FixtureGunSafeWeightTickets, FixtureQueues, FixtureWeightTickets,
    GunSafeWeightTicketCreator, GunSafeWeightTicketDeleter, GunSafeWeightTicketUpdater,
    MoveQueueFetcher, PaymentRequestQueueFetcher, WeightTicketDeleter, WeightTicketFetcher,
    WeightTicketUpdater,
};

/// Dependency bundle for HTTP handlers.
///
/// Fields are public so tests and the server can swap individual ports.
#[derive(Clone)]
pub struct HttpState {
    pub flags: Arc<dyn FeatureFlagFetcher>,
    pub gun_safe_creator: Arc<dyn GunSafeWeightTicketCreator>,
    pub gun_safe_updater: Arc<dyn GunSafeWeightTicketUpdater>,
    pub gun_safe_deleter: Arc<dyn GunSafeWeightTicketDeleter>,
    pub weight_ticket_fetcher: Arc<dyn WeightTicketFetcher>,
    pub weight_ticket_updater: Arc<dyn WeightTicketUpdater>,
    pub weight_ticket_deleter: Arc<dyn WeightTicketDeleter>,
    pub report_fetcher: Arc<dyn EvaluationReportFetcher>,
    pub report_creator: Arc<dyn EvaluationReportCreator>,
    pub report_updater: Arc<dyn EvaluationReportUpdater>,
    pub report_deleter: Arc<dyn EvaluationReportDeleter>,
    pub report_renderer: Arc<dyn EvaluationReportRenderer>,
    pub move_queue: Arc<dyn MoveQueueFetcher>,
    pub payment_request_queue: Arc<dyn PaymentRequestQueueFetcher>,
}

impl HttpState {
    /// Wire every service port to its fixture implementation.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use ghc_api::domain::ports::StaticFeatureFlagFetcher;
    /// use ghc_api::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::with_fixtures(Arc::new(StaticFeatureFlagFetcher::default()));
    /// let _ = state.move_queue;
    /// ```
    pub fn with_fixtures(flags: Arc<dyn FeatureFlagFetcher>) -> Self {
        let gun_safe = Arc::new(FixtureGunSafeWeightTickets);
        let weight_tickets = Arc::new(FixtureWeightTickets);
        let reports = Arc::new(FixtureEvaluationReports);
        let queues = Arc::new(FixtureQueues);
        Self {
            flags,
            gun_safe_creator: gun_safe.clone(),
            gun_safe_updater: gun_safe.clone(),
            gun_safe_deleter: gun_safe,
            weight_ticket_fetcher: weight_tickets.clone(),
            weight_ticket_updater: weight_tickets.clone(),
            weight_ticket_deleter: weight_tickets,
            report_fetcher: reports.clone(),
            report_creator: reports.clone(),
            report_updater: reports.clone(),
            report_deleter: reports.clone(),
            report_renderer: reports,
            move_queue: queues.clone(),
            payment_request_queue: queues,
        }
    }
}

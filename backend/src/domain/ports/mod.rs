//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Each trait is one capability the HTTP adapter consumes. Every trait has a
//! `Fixture*` implementation for wiring without a data store and, under
//! `cfg(test)`, a `mockall` mock.

mod macros;
pub(crate) use macros::define_port_error;

mod evaluation_report;
mod feature_flag_fetcher;
mod fixtures;
mod gun_safe_weight_ticket;
mod queues;
mod weight_ticket;

pub use evaluation_report::{
    EvaluationReportCreator, EvaluationReportDeleter, EvaluationReportFetcher,
    EvaluationReportRenderer, EvaluationReportUpdater, FixtureEvaluationReports,
};
#[cfg(test)]
pub use evaluation_report::{
    MockEvaluationReportCreator, MockEvaluationReportDeleter, MockEvaluationReportFetcher,
    MockEvaluationReportRenderer, MockEvaluationReportUpdater,
};
#[cfg(test)]
pub use feature_flag_fetcher::MockFeatureFlagFetcher;
pub use feature_flag_fetcher::{FeatureFlagError, FeatureFlagFetcher, StaticFeatureFlagFetcher};
pub use gun_safe_weight_ticket::{
    FixtureGunSafeWeightTickets, GunSafeWeightTicketCreator, GunSafeWeightTicketDeleter,
    GunSafeWeightTicketUpdater,
};
#[cfg(test)]
pub use gun_safe_weight_ticket::{
    MockGunSafeWeightTicketCreator, MockGunSafeWeightTicketDeleter,
    MockGunSafeWeightTicketUpdater,
};
pub use queues::{FixtureQueues, MoveQueueFetcher, PaymentRequestQueueFetcher};
#[cfg(test)]
pub use queues::{MockMoveQueueFetcher, MockPaymentRequestQueueFetcher};
pub use weight_ticket::{
    FixtureWeightTickets, WeightTicketDeleter, WeightTicketFetcher, WeightTicketUpdater,
};
#[cfg(test)]
pub use weight_ticket::{MockWeightTicketDeleter, MockWeightTicketFetcher, MockWeightTicketUpdater};

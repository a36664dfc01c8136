//! Driving ports for the office work queues.
//!
//! Queue fetchers are read-only: the same filter and page against unchanged
//! data must yield the same rows in the same order.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{
    MoveQueueFilter, PaymentRequestQueueFilter, QueueMove, QueuePaymentRequest, RequestContext,
    ServiceResult,
};

/// Lists moves for the TOO queue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MoveQueueFetcher: Send + Sync {
    /// Return one page of moves matching `filter`, scoped to the caller's
    /// GBLOC unless the filter overrides it.
    async fn list(
        &self,
        ctx: &RequestContext,
        filter: MoveQueueFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<QueueMove>>;
}

/// Lists payment requests for the TIO queue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRequestQueueFetcher: Send + Sync {
    /// Return one page of payment requests matching `filter`.
    async fn list(
        &self,
        ctx: &RequestContext,
        filter: PaymentRequestQueueFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<QueuePaymentRequest>>;
}

/// Fixture implementation serving empty queues.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureQueues;

#[async_trait]
impl MoveQueueFetcher for FixtureQueues {
    async fn list(
        &self,
        _ctx: &RequestContext,
        _filter: MoveQueueFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<QueueMove>> {
        Ok(Page::new(page, 0, Vec::new()))
    }
}

#[async_trait]
impl PaymentRequestQueueFetcher for FixtureQueues {
    async fn list(
        &self,
        _ctx: &RequestContext,
        _filter: PaymentRequestQueueFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<QueuePaymentRequest>> {
        Ok(Page::new(page, 0, Vec::new()))
    }
}

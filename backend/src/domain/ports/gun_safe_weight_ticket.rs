//! Driving ports for gun safe weight ticket operations.
//!
//! One trait per operation so each handler depends only on what it calls.

use async_trait::async_trait;
use uuid::Uuid;

use super::fixtures::fixture_timestamp;
use crate::domain::{
    ETag, GunSafeWeightTicket, GunSafeWeightTicketUpdate, RequestContext, ServiceResult,
};

/// Creates an empty gun safe weight ticket on a PPM shipment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GunSafeWeightTicketCreator: Send + Sync {
    /// Create a ticket (and its document set) for `ppm_shipment_id`.
    async fn create(
        &self,
        ctx: &RequestContext,
        ppm_shipment_id: Uuid,
    ) -> ServiceResult<GunSafeWeightTicket>;
}

/// Applies edits to a gun safe weight ticket.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GunSafeWeightTicketUpdater: Send + Sync {
    /// Apply `update` if `if_match` still matches the stored record.
    async fn update(
        &self,
        ctx: &RequestContext,
        update: GunSafeWeightTicketUpdate,
        if_match: ETag,
    ) -> ServiceResult<GunSafeWeightTicket>;
}

/// Soft-deletes a gun safe weight ticket.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GunSafeWeightTicketDeleter: Send + Sync {
    /// Delete `ticket_id`, which must belong to `ppm_shipment_id`.
    async fn delete(
        &self,
        ctx: &RequestContext,
        ppm_shipment_id: Uuid,
        ticket_id: Uuid,
    ) -> ServiceResult<()>;
}

/// Fixture implementation returning canned tickets without persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGunSafeWeightTickets;

#[async_trait]
impl GunSafeWeightTicketCreator for FixtureGunSafeWeightTickets {
    async fn create(
        &self,
        _ctx: &RequestContext,
        ppm_shipment_id: Uuid,
    ) -> ServiceResult<GunSafeWeightTicket> {
        Ok(GunSafeWeightTicket {
            id: Uuid::new_v4(),
            ppm_shipment_id,
            document_id: Uuid::new_v4(),
            description: None,
            weight: None,
            has_weight_tickets: None,
            status: None,
            reason: None,
            created_at: fixture_timestamp(),
            updated_at: fixture_timestamp(),
        })
    }
}

#[async_trait]
impl GunSafeWeightTicketUpdater for FixtureGunSafeWeightTickets {
    async fn update(
        &self,
        _ctx: &RequestContext,
        update: GunSafeWeightTicketUpdate,
        _if_match: ETag,
    ) -> ServiceResult<GunSafeWeightTicket> {
        Ok(GunSafeWeightTicket {
            id: update.id,
            ppm_shipment_id: update.ppm_shipment_id,
            document_id: Uuid::nil(),
            description: update.description,
            weight: update.weight,
            has_weight_tickets: update.has_weight_tickets,
            status: update.status,
            reason: update.reason,
            created_at: fixture_timestamp(),
            updated_at: fixture_timestamp(),
        })
    }
}

#[async_trait]
impl GunSafeWeightTicketDeleter for FixtureGunSafeWeightTickets {
    async fn delete(
        &self,
        _ctx: &RequestContext,
        _ppm_shipment_id: Uuid,
        _ticket_id: Uuid,
    ) -> ServiceResult<()> {
        Ok(())
    }
}

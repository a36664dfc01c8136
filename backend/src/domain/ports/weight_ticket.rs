//! Driving ports for weight ticket operations.

use async_trait::async_trait;
use uuid::Uuid;

use super::fixtures::fixture_timestamp;
use crate::domain::{ETag, RequestContext, ServiceResult, WeightTicket, WeightTicketUpdate};

/// Reads the weight tickets of a PPM shipment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeightTicketFetcher: Send + Sync {
    /// List the tickets on `ppm_shipment_id`, oldest first.
    async fn list_for_shipment(
        &self,
        ctx: &RequestContext,
        ppm_shipment_id: Uuid,
    ) -> ServiceResult<Vec<WeightTicket>>;
}

/// Applies office edits to a weight ticket.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeightTicketUpdater: Send + Sync {
    /// Apply `update` if `if_match` still matches the stored record.
    async fn update(
        &self,
        ctx: &RequestContext,
        update: WeightTicketUpdate,
        if_match: ETag,
    ) -> ServiceResult<WeightTicket>;
}

/// Soft-deletes a weight ticket.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeightTicketDeleter: Send + Sync {
    /// Delete `ticket_id`, which must belong to `ppm_shipment_id`.
    async fn delete(
        &self,
        ctx: &RequestContext,
        ppm_shipment_id: Uuid,
        ticket_id: Uuid,
    ) -> ServiceResult<()>;
}

/// Fixture implementation serving one deterministic ticket per shipment.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureWeightTickets;

impl FixtureWeightTickets {
    fn sample(ppm_shipment_id: Uuid) -> WeightTicket {
        WeightTicket {
            id: Uuid::from_u128(0x0b5f_7a64_4c1e_4f0a_9a51_1d2a_3b4c_5d6e),
            ppm_shipment_id,
            vehicle_description: Some("2019 pickup".to_owned()),
            empty_weight: Some(4_100),
            full_weight: Some(7_350),
            owns_trailer: false,
            trailer_meets_criteria: false,
            adjusted_net_weight: None,
            net_weight_remarks: None,
            status: None,
            reason: None,
            created_at: fixture_timestamp(),
            updated_at: fixture_timestamp(),
        }
    }
}

#[async_trait]
impl WeightTicketFetcher for FixtureWeightTickets {
    async fn list_for_shipment(
        &self,
        _ctx: &RequestContext,
        ppm_shipment_id: Uuid,
    ) -> ServiceResult<Vec<WeightTicket>> {
        Ok(vec![Self::sample(ppm_shipment_id)])
    }
}

#[async_trait]
impl WeightTicketUpdater for FixtureWeightTickets {
    async fn update(
        &self,
        _ctx: &RequestContext,
        update: WeightTicketUpdate,
        _if_match: ETag,
    ) -> ServiceResult<WeightTicket> {
        let current = Self::sample(update.ppm_shipment_id);
        Ok(WeightTicket {
            id: update.id,
            empty_weight: update.empty_weight.or(current.empty_weight),
            full_weight: update.full_weight.or(current.full_weight),
            owns_trailer: update.owns_trailer.unwrap_or(current.owns_trailer),
            trailer_meets_criteria: update
                .trailer_meets_criteria
                .unwrap_or(current.trailer_meets_criteria),
            adjusted_net_weight: update.adjusted_net_weight,
            net_weight_remarks: update.net_weight_remarks,
            status: update.status,
            reason: update.reason,
            ..current
        })
    }
}

#[async_trait]
impl WeightTicketDeleter for FixtureWeightTickets {
    async fn delete(
        &self,
        _ctx: &RequestContext,
        _ppm_shipment_id: Uuid,
        _ticket_id: Uuid,
    ) -> ServiceResult<()> {
        Ok(())
    }
}

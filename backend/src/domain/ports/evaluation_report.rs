//! Driving ports for evaluation report operations.

use async_trait::async_trait;
use uuid::Uuid;

use super::fixtures::fixture_timestamp;
use crate::domain::{
    ETag, EvaluationReport, EvaluationReportDocument, EvaluationReportType,
    EvaluationReportUpdate, MoveLocator, NewEvaluationReport, RequestContext, ServiceError,
    ServiceResult,
};

/// Reads evaluation reports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvaluationReportFetcher: Send + Sync {
    /// Fetch one report visible to the caller.
    async fn fetch(&self, ctx: &RequestContext, report_id: Uuid)
    -> ServiceResult<EvaluationReport>;

    /// List the caller-visible reports of `report_type` on a move.
    async fn list_for_move(
        &self,
        ctx: &RequestContext,
        move_id: Uuid,
        report_type: EvaluationReportType,
    ) -> ServiceResult<Vec<EvaluationReport>>;
}

/// Creates draft evaluation reports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvaluationReportCreator: Send + Sync {
    /// Create `report` on the move identified by `locator`.
    async fn create(
        &self,
        ctx: &RequestContext,
        report: NewEvaluationReport,
        locator: MoveLocator,
    ) -> ServiceResult<EvaluationReport>;
}

/// Saves and submits draft evaluation reports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvaluationReportUpdater: Send + Sync {
    /// Save edits to a draft report if `if_match` is current.
    async fn save(
        &self,
        ctx: &RequestContext,
        update: EvaluationReportUpdate,
        if_match: ETag,
    ) -> ServiceResult<()>;

    /// Submit a draft report, making it read-only, if `if_match` is current.
    async fn submit(
        &self,
        ctx: &RequestContext,
        report_id: Uuid,
        office_user_id: Option<Uuid>,
        if_match: ETag,
    ) -> ServiceResult<()>;
}

/// Soft-deletes evaluation reports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvaluationReportDeleter: Send + Sync {
    /// Delete a draft report.
    async fn delete(&self, ctx: &RequestContext, report_id: Uuid) -> ServiceResult<()>;
}

/// Renders evaluation reports as printable PDFs.
///
/// Implementations gather the move, orders, shipments, and violations the
/// form needs; a missing piece surfaces as [`ServiceError::NotFound`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvaluationReportRenderer: Send + Sync {
    /// Render one report visible to the caller.
    async fn render(
        &self,
        ctx: &RequestContext,
        report_id: Uuid,
    ) -> ServiceResult<EvaluationReportDocument>;
}

/// Fixture implementation over a single canned draft report.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEvaluationReports;

impl FixtureEvaluationReports {
    /// Identifier of the canned report.
    pub const REPORT_ID: Uuid = Uuid::from_u128(0x5e1f_2c3d_4b5a_4e6f_8a7b_9c0d_1e2f_3a4b);

    const BLANK_PDF: &'static [u8] = b"%PDF-1.4\n%%EOF\n";

    fn sample(move_id: Uuid, report_type: EvaluationReportType) -> EvaluationReport {
        EvaluationReport {
            id: Self::REPORT_ID,
            move_id,
            shipment_id: None,
            office_user_id: Uuid::nil(),
            report_type,
            inspection_date: None,
            location: None,
            location_description: None,
            violations_observed: None,
            remarks: None,
            submitted_at: None,
            created_at: fixture_timestamp(),
            updated_at: fixture_timestamp(),
        }
    }
}

#[async_trait]
impl EvaluationReportFetcher for FixtureEvaluationReports {
    async fn fetch(
        &self,
        _ctx: &RequestContext,
        report_id: Uuid,
    ) -> ServiceResult<EvaluationReport> {
        if report_id == Self::REPORT_ID {
            Ok(Self::sample(Uuid::nil(), EvaluationReportType::Counseling))
        } else {
            Err(ServiceError::not_found("EvaluationReport", Some(report_id)))
        }
    }

    async fn list_for_move(
        &self,
        _ctx: &RequestContext,
        move_id: Uuid,
        report_type: EvaluationReportType,
    ) -> ServiceResult<Vec<EvaluationReport>> {
        Ok(vec![Self::sample(move_id, report_type)])
    }
}

#[async_trait]
impl EvaluationReportRenderer for FixtureEvaluationReports {
    async fn render(
        &self,
        ctx: &RequestContext,
        report_id: Uuid,
    ) -> ServiceResult<EvaluationReportDocument> {
        let report = self.fetch(ctx, report_id).await?;
        let short_id: String = report
            .id
            .simple()
            .to_string()
            .chars()
            .take(5)
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Ok(EvaluationReportDocument {
            file_name: format!("QA-{short_id} {}.pdf", report.created_at.format("%m-%d-%Y")),
            pdf: Self::BLANK_PDF.to_vec(),
        })
    }
}

#[async_trait]
impl EvaluationReportCreator for FixtureEvaluationReports {
    async fn create(
        &self,
        _ctx: &RequestContext,
        report: NewEvaluationReport,
        _locator: MoveLocator,
    ) -> ServiceResult<EvaluationReport> {
        let mut created = Self::sample(Uuid::nil(), report.report_type);
        created.id = report.id;
        created.shipment_id = report.shipment_id;
        created.office_user_id = report.office_user_id.unwrap_or_default();
        Ok(created)
    }
}

#[async_trait]
impl EvaluationReportUpdater for FixtureEvaluationReports {
    async fn save(
        &self,
        _ctx: &RequestContext,
        _update: EvaluationReportUpdate,
        _if_match: ETag,
    ) -> ServiceResult<()> {
        Ok(())
    }

    async fn submit(
        &self,
        _ctx: &RequestContext,
        _report_id: Uuid,
        _office_user_id: Option<Uuid>,
        _if_match: ETag,
    ) -> ServiceResult<()> {
        Ok(())
    }
}

#[async_trait]
impl EvaluationReportDeleter for FixtureEvaluationReports {
    async fn delete(&self, _ctx: &RequestContext, _report_id: Uuid) -> ServiceResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ServiceErrorKind, TraceId};

    fn ctx() -> RequestContext {
        RequestContext::new(None, TraceId::generate())
    }

    #[tokio::test]
    async fn fixture_fetches_only_the_canned_report() {
        let reports = FixtureEvaluationReports;
        let found = reports
            .fetch(&ctx(), FixtureEvaluationReports::REPORT_ID)
            .await
            .expect("canned report");
        assert_eq!(found.id, FixtureEvaluationReports::REPORT_ID);

        let missing = reports
            .fetch(&ctx(), Uuid::new_v4())
            .await
            .expect_err("unknown id");
        assert_eq!(missing.kind(), ServiceErrorKind::NotFound);
    }

    #[tokio::test]
    async fn fixture_renders_the_canned_report_as_pdf() {
        let document = FixtureEvaluationReports
            .render(&ctx(), FixtureEvaluationReports::REPORT_ID)
            .await
            .expect("rendered");
        assert!(document.pdf.starts_with(b"%PDF-"));
        assert!(document.file_name.starts_with("QA-5E1F2 "));
        assert!(document.file_name.ends_with(".pdf"));

        let missing = FixtureEvaluationReports
            .render(&ctx(), Uuid::new_v4())
            .await
            .expect_err("unknown id");
        assert_eq!(missing.kind(), ServiceErrorKind::NotFound);
    }

    #[tokio::test]
    async fn fixture_create_keeps_requested_type_and_shipment() {
        let shipment_id = Uuid::new_v4();
        let report = NewEvaluationReport {
            id: Uuid::new_v4(),
            report_type: EvaluationReportType::Shipment,
            shipment_id: Some(shipment_id),
            office_user_id: None,
        };
        let locator = MoveLocator::new("ABC123").expect("locator");
        let created = FixtureEvaluationReports
            .create(&ctx(), report.clone(), locator)
            .await
            .expect("created");
        assert_eq!(created.id, report.id);
        assert_eq!(created.report_type, EvaluationReportType::Shipment);
        assert_eq!(created.shipment_id, Some(shipment_id));
    }
}

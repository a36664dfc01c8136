//! Office work queue handlers.
//!
//! ```text
//! GET /ghc/v1/queues/moves
//! GET /ghc/v1/queues/payment-requests
//! ```
//!
//! Both endpoints are read-only. Query strings are read as raw pairs so
//! repeated keys (`status=A&status=B`) are honoured.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, get, web};
use chrono::{DateTime, NaiveDate, Utc};
use pagination::{Page, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    Gbloc, MoveQueueFilter, MoveQueueSort, MoveStatus, PaymentRequestQueueFilter,
    PaymentRequestQueueSort, PaymentRequestStatus, QueueCustomer, QueueMove, QueuePaymentRequest,
    RoleType, Session, SortOrder,
};
use crate::inbound::http::context::{AppContext, auditable};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::error_table::ErrorTable;
use crate::inbound::http::gates::{require_any_role, require_office_user, require_session};
use crate::inbound::http::rejection::Rejection;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, page_request, parse_date, parse_gbloc, parse_integer, parse_keyword,
};

const QUEUE_ERRORS: ErrorTable = ErrorTable::new();

const MOVE_QUEUE_ROLES: [RoleType; 2] = [RoleType::TaskOrderingOfficer, RoleType::Headquarters];
const PAYMENT_QUEUE_ROLES: [RoleType; 2] =
    [RoleType::TaskInvoicingOfficer, RoleType::Headquarters];

/// Raw query pairs grouped by key, preserving repeat order.
#[derive(Debug, Default)]
struct QueryPairs(BTreeMap<String, Vec<String>>);

impl QueryPairs {
    fn new(pairs: Vec<(String, String)>) -> Self {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, value) in pairs {
            grouped.entry(key).or_default().push(value);
        }
        Self(grouped)
    }

    /// First non-blank value for `key`.
    fn first(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(|values| values.iter().map(|value| value.trim()).find(|v| !v.is_empty()))
    }

    /// Every value for `key`, splitting comma-separated lists.
    fn all(&self, key: &str) -> Vec<&str> {
        self.0
            .get(key)
            .map(|values| {
                values
                    .iter()
                    .flat_map(|value| value.split(','))
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn text(&self, key: &str) -> Option<String> {
        self.first(key).map(ToOwned::to_owned)
    }

    fn page(&self) -> Result<PageRequest, ApiError> {
        let page = self
            .first("page")
            .map(|raw| parse_integer(raw, FieldName::new("page")))
            .transpose()?;
        let per_page = self
            .first("perPage")
            .map(|raw| parse_integer(raw, FieldName::new("perPage")))
            .transpose()?;
        page_request(page, per_page)
    }

    fn keyword<T: serde::de::DeserializeOwned>(
        &self,
        key: &'static str,
    ) -> Result<Option<T>, ApiError> {
        self.first(key)
            .map(|raw| parse_keyword(raw, FieldName::new(key)))
            .transpose()
    }

    fn date(&self, key: &'static str) -> Result<Option<NaiveDate>, ApiError> {
        self.first(key)
            .map(|raw| parse_date(raw, FieldName::new(key)))
            .transpose()
    }

    fn gbloc(&self, key: &'static str) -> Result<Option<Gbloc>, ApiError> {
        self.first(key)
            .map(|raw| parse_gbloc(raw, FieldName::new(key)))
            .transpose()
    }
}

/// Keep a requested GBLOC override only when the caller may use it.
fn permitted_gbloc(session: &Session, requested: Option<Gbloc>) -> Option<Gbloc> {
    requested.filter(|gbloc| session.has_role(RoleType::Headquarters) || session.owns_gbloc(gbloc))
}

fn move_queue_filter(session: &Session, query: &QueryPairs) -> Result<MoveQueueFilter, ApiError> {
    let mut statuses = query
        .all("status")
        .into_iter()
        .map(|raw| parse_keyword::<MoveStatus>(raw, FieldName::new("status")))
        .collect::<Result<Vec<_>, _>>()?;
    if statuses.is_empty() {
        statuses = MoveStatus::DEFAULT_QUEUE_STATUSES.to_vec();
    }
    Ok(MoveQueueFilter {
        statuses,
        locator: query.text("locator"),
        last_name: query.text("lastName"),
        dod_id: query.text("dodID"),
        branch: query.text("branch"),
        origin_duty_location: query.text("originDutyLocation"),
        view_as_gbloc: permitted_gbloc(session, query.gbloc("viewAsGBLOC")?),
        sort: query.keyword::<MoveQueueSort>("sort")?,
        order: query.keyword::<SortOrder>("order")?,
    })
}

fn payment_request_queue_filter(
    session: &Session,
    query: &QueryPairs,
) -> Result<PaymentRequestQueueFilter, ApiError> {
    Ok(PaymentRequestQueueFilter {
        status: PaymentRequestStatus::Pending,
        locator: query.text("locator"),
        last_name: query.text("lastName"),
        dod_id: query.text("dodID"),
        submitted_at: query.date("submittedAt")?,
        view_as_gbloc: permitted_gbloc(session, query.gbloc("viewAsGBLOC")?),
        sort: query.keyword::<PaymentRequestQueueSort>("sort")?,
        order: query.keyword::<SortOrder>("order")?,
    })
}

/// Customer summary shown in queue rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueueCustomerBody {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "dodID")]
    pub dod_id: Option<String>,
    pub agency: Option<String>,
}

/// One row of the move queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueueMoveBody {
    pub id: Uuid,
    pub locator: String,
    pub customer: QueueCustomerBody,
    #[schema(value_type = String, example = "SUBMITTED")]
    pub status: MoveStatus,
    pub requested_move_date: Option<NaiveDate>,
    pub appeared_in_too_at: Option<DateTime<Utc>>,
    pub shipments_count: u32,
    pub origin_duty_location: Option<String>,
    #[serde(rename = "originGBLOC")]
    pub origin_gbloc: Option<String>,
}

/// One row of the payment request queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueuePaymentRequestBody {
    pub id: Uuid,
    #[serde(rename = "moveID")]
    pub move_id: Uuid,
    pub locator: String,
    pub customer: QueueCustomerBody,
    #[schema(value_type = String, example = "PENDING")]
    pub status: PaymentRequestStatus,
    pub age: u32,
    pub submitted_at: DateTime<Utc>,
    #[serde(rename = "originGBLOC")]
    pub origin_gbloc: Option<String>,
    pub origin_duty_location: Option<String>,
}

/// A page of the move queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueueMovesResult {
    pub page: u32,
    pub per_page: u32,
    pub total_count: u64,
    pub queue_moves: Vec<QueueMoveBody>,
}

/// A page of the payment request queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueuePaymentRequestsResult {
    pub page: u32,
    pub per_page: u32,
    pub total_count: u64,
    pub queue_payment_requests: Vec<QueuePaymentRequestBody>,
}

fn customer_body(customer: QueueCustomer) -> Option<QueueCustomerBody> {
    if customer.id.is_nil() {
        return None;
    }
    Some(QueueCustomerBody {
        id: customer.id,
        first_name: customer.first_name,
        last_name: customer.last_name,
        dod_id: customer.dod_id,
        agency: customer.branch,
    })
}

pub(crate) fn queue_move_body(row: QueueMove) -> Option<QueueMoveBody> {
    if row.id.is_nil() {
        return None;
    }
    Some(QueueMoveBody {
        id: row.id,
        locator: row.locator.to_string(),
        customer: customer_body(row.customer)?,
        status: row.status,
        requested_move_date: row.requested_move_date,
        appeared_in_too_at: row.appeared_in_too_at,
        shipments_count: row.shipments_count,
        origin_duty_location: row.origin_duty_location,
        origin_gbloc: row.origin_gbloc.map(String::from),
    })
}

pub(crate) fn queue_payment_request_body(
    row: QueuePaymentRequest,
) -> Option<QueuePaymentRequestBody> {
    if row.id.is_nil() {
        return None;
    }
    Some(QueuePaymentRequestBody {
        id: row.id,
        move_id: row.move_id,
        locator: row.locator.to_string(),
        customer: customer_body(row.customer)?,
        status: row.status,
        age: row.age_days,
        submitted_at: row.submitted_at,
        origin_gbloc: row.origin_gbloc.map(String::from),
        origin_duty_location: row.origin_duty_location,
    })
}

fn moves_result(page: Page<QueueMoveBody>) -> QueueMovesResult {
    QueueMovesResult {
        page: page.request.page(),
        per_page: page.request.per_page(),
        total_count: page.total_count,
        queue_moves: page.items,
    }
}

fn payment_requests_result(page: Page<QueuePaymentRequestBody>) -> QueuePaymentRequestsResult {
    QueuePaymentRequestsResult {
        page: page.request.page(),
        per_page: page.request.per_page(),
        total_count: page.total_count,
        queue_payment_requests: page.items,
    }
}

/// Moves awaiting task ordering officer action.
#[utoipa::path(
    get,
    path = "/ghc/v1/queues/moves",
    params(
        ("page" = Option<i64>, Query, description = "1-based page number"),
        ("perPage" = Option<i64>, Query, description = "Rows per page (1-100)"),
        ("sort" = Option<String>, Query, description = "Sort column"),
        ("order" = Option<String>, Query, description = "asc or desc"),
        ("status" = Option<Vec<String>>, Query, description = "Move statuses to include"),
        ("locator" = Option<String>, Query, description = "Move code filter"),
        ("lastName" = Option<String>, Query, description = "Customer last name filter"),
        ("dodID" = Option<String>, Query, description = "Customer DoD id filter"),
        ("branch" = Option<String>, Query, description = "Service branch filter"),
        ("originDutyLocation" = Option<String>, Query, description = "Origin duty location filter"),
        ("viewAsGBLOC" = Option<String>, Query, description = "GBLOC to view the queue as")
    ),
    responses(
        (status = 200, description = "Queue page", body = QueueMovesResult),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Caller lacks TOO or HQ role"),
        (status = 500, description = "Internal error", body = ErrorSchema)
    ),
    tags = ["queues"],
    operation_id = "getMovesQueue",
    security(("SessionCookie" = []))
)]
#[get("/queues/moves")]
pub async fn get_moves_queue(
    state: web::Data<HttpState>,
    ctx: AppContext,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, Rejection> {
    auditable("get_moves_queue", ctx, |request| async move {
        let session = require_session(&request)?;
        require_office_user(session)?;
        require_any_role(session, &MOVE_QUEUE_ROLES)?;
        let pairs = QueryPairs::new(query.into_inner());
        let filter = move_queue_filter(session, &pairs)?;
        let page = pairs.page()?;

        let rows = state
            .move_queue
            .list(&request, filter, page)
            .await
            .map_err(|err| QUEUE_ERRORS.reject(err))?;
        let body = rows
            .try_map(queue_move_body)
            .map(moves_result)
            .ok_or_else(|| Rejection::mapping_fault("QueueMove"))?;
        Ok(HttpResponse::Ok().json(body))
    })
    .await
}

/// Pending payment requests awaiting task invoicing officer review.
#[utoipa::path(
    get,
    path = "/ghc/v1/queues/payment-requests",
    params(
        ("page" = Option<i64>, Query, description = "1-based page number"),
        ("perPage" = Option<i64>, Query, description = "Rows per page (1-100)"),
        ("sort" = Option<String>, Query, description = "Sort column"),
        ("order" = Option<String>, Query, description = "asc or desc"),
        ("locator" = Option<String>, Query, description = "Move code filter"),
        ("lastName" = Option<String>, Query, description = "Customer last name filter"),
        ("dodID" = Option<String>, Query, description = "Customer DoD id filter"),
        ("submittedAt" = Option<String>, Query, description = "Submission date (YYYY-MM-DD)"),
        ("viewAsGBLOC" = Option<String>, Query, description = "GBLOC to view the queue as")
    ),
    responses(
        (status = 200, description = "Queue page", body = QueuePaymentRequestsResult),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Caller lacks TIO or HQ role"),
        (status = 500, description = "Internal error", body = ErrorSchema)
    ),
    tags = ["queues"],
    operation_id = "getPaymentRequestsQueue",
    security(("SessionCookie" = []))
)]
#[get("/queues/payment-requests")]
pub async fn get_payment_requests_queue(
    state: web::Data<HttpState>,
    ctx: AppContext,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, Rejection> {
    auditable("get_payment_requests_queue", ctx, |request| async move {
        let session = require_session(&request)?;
        require_office_user(session)?;
        require_any_role(session, &PAYMENT_QUEUE_ROLES)?;
        let pairs = QueryPairs::new(query.into_inner());
        let filter = payment_request_queue_filter(session, &pairs)?;
        let page = pairs.page()?;

        let rows = state
            .payment_request_queue
            .list(&request, filter, page)
            .await
            .map_err(|err| QUEUE_ERRORS.reject(err))?;
        let body = rows
            .try_map(queue_payment_request_body)
            .map(payment_requests_result)
            .ok_or_else(|| Rejection::mapping_fault("QueuePaymentRequest"))?;
        Ok(HttpResponse::Ok().json(body))
    })
    .await
}

#[cfg(test)]
#[path = "queues_tests.rs"]
mod tests;

//! Tests for evaluation report handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, IF_MATCH};
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    FixtureEvaluationReports, MockEvaluationReportCreator, MockEvaluationReportFetcher,
    MockEvaluationReportRenderer, MockEvaluationReportUpdater,
};
use crate::domain::{FieldErrors, ServiceError};
use crate::inbound::http::test_utils::{
    LogCapture, customer_session, fixture_state, office_session, session_cookie, test_app,
    trace_header,
};

const MOVE_ID: &str = "1a2b3c4d-5e6f-4a7b-8c9d-0e1f2a3b4c5d";
const SHIPMENT_ID: &str = "7d6c5b4a-3f2e-4d1c-9b8a-7f6e5d4c3b2a";

fn report(id: Uuid, report_type: EvaluationReportType) -> EvaluationReport {
    let stamp = DateTime::from_timestamp(1_714_564_800, 0).unwrap_or_default();
    EvaluationReport {
        id,
        move_id: Uuid::parse_str(MOVE_ID).expect("move id"),
        shipment_id: None,
        office_user_id: Uuid::new_v4(),
        report_type,
        inspection_date: None,
        location: None,
        location_description: None,
        violations_observed: None,
        remarks: None,
        submitted_at: None,
        created_at: stamp,
        updated_at: stamp,
    }
}

fn report_uri() -> String {
    format!("/ghc/v1/evaluation-reports/{}", FixtureEvaluationReports::REPORT_ID)
}

#[rstest]
#[case("shipment-evaluation-reports-list", EvaluationReportType::Shipment)]
#[case("counseling-evaluation-reports-list", EvaluationReportType::Counseling)]
#[actix_web::test]
async fn lists_ask_for_matching_report_type(
    #[case] segment: &str,
    #[case] expected: EvaluationReportType,
) {
    let mut fetcher = MockEvaluationReportFetcher::new();
    fetcher
        .expect_list_for_move()
        .times(1)
        .withf(move |_, move_id, report_type| {
            move_id.to_string() == MOVE_ID && *report_type == expected
        })
        .returning(|_, _, report_type| Ok(vec![report(Uuid::new_v4(), report_type)]));
    let mut state = fixture_state(&[]);
    state.report_fetcher = Arc::new(fetcher);
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = session_cookie(&app, &office_session()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/ghc/v1/moves/{MOVE_ID}/{segment}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body[0]["type"], serde_json::to_value(expected).expect("type"));
}

#[actix_web::test]
async fn non_office_user_gets_bare_forbidden_on_list() {
    let app = actix_test::init_service(test_app(fixture_state(&[]))).await;
    let cookie = session_cookie(&app, &customer_session()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/ghc/v1/moves/{MOVE_ID}/shipment-evaluation-reports-list"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert!(actix_test::read_body(res).await.is_empty());
}

#[actix_web::test]
async fn fetch_returns_fixture_report() {
    let app = actix_test::init_service(test_app(fixture_state(&[]))).await;
    let cookie = session_cookie(&app, &office_session()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri(&report_uri()).cookie(cookie).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["id"], FixtureEvaluationReports::REPORT_ID.to_string());
    assert!(body["eTag"].is_string());
}

#[actix_web::test]
async fn fetch_not_found_carries_tagged_message() {
    let app = actix_test::init_service(test_app(fixture_state(&[]))).await;
    let cookie = session_cookie(&app, &office_session()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/ghc/v1/evaluation-reports/{}", Uuid::new_v4()))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let trace_id = trace_header(&res);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|message| message.ends_with(&format!("Instance: {trace_id}")))
    );
}

#[actix_web::test]
async fn fetch_forbidden_carries_message() {
    let mut fetcher = MockEvaluationReportFetcher::new();
    fetcher
        .expect_fetch()
        .return_once(|_, _| Err(ServiceError::forbidden("draft belongs to another evaluator")));
    let mut state = fixture_state(&[]);
    state.report_fetcher = Arc::new(fetcher);
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = session_cookie(&app, &office_session()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri(&report_uri()).cookie(cookie).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(res).await;
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|message| message.starts_with("draft belongs to another evaluator"))
    );
}

#[actix_web::test]
async fn download_serves_inline_pdf() {
    let app = actix_test::init_service(test_app(fixture_state(&[]))).await;
    let cookie = session_cookie(&app, &office_session()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("{}/download", report_uri()))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/pdf")
    );
    let disposition = res
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("content disposition");
    assert!(disposition.starts_with("inline; filename=\"QA-5E1F2 "), "{disposition}");
    let body = actix_test::read_body(res).await;
    assert!(body.starts_with(b"%PDF-"));
}

#[actix_web::test]
async fn download_without_session_is_unauthorized() {
    let mut state = fixture_state(&[]);
    state.report_renderer = Arc::new(MockEvaluationReportRenderer::new());
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("{}/download", report_uri()))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case(ServiceError::not_found("Orders", None), StatusCode::NOT_FOUND, "not_found")]
#[case(ServiceError::forbidden("not the author"), StatusCode::FORBIDDEN, "forbidden")]
#[case(
    ServiceError::query("orders", "fetch", std::io::Error::other("down")),
    StatusCode::INTERNAL_SERVER_ERROR,
    "internal_error"
)]
#[actix_web::test]
async fn download_maps_service_errors(
    #[case] err: ServiceError,
    #[case] status: StatusCode,
    #[case] code: &str,
) {
    let mut renderer = MockEvaluationReportRenderer::new();
    renderer
        .expect_render()
        .times(1)
        .withf(|_, report_id| *report_id == FixtureEvaluationReports::REPORT_ID)
        .return_once(move |_, _| Err(err));
    let mut state = fixture_state(&[]);
    state.report_renderer = Arc::new(renderer);
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = session_cookie(&app, &office_session()).await;
    let (logs, _guard) = LogCapture::install();

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("{}/download", report_uri()))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), status);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], code);
    assert_eq!(logs.records_for("download_evaluation_report", "ERROR").len(), 1);
}

#[actix_web::test]
async fn create_with_shipment_body_creates_shipment_report() {
    let session = office_session();
    let office_user_id = session.office_user_id;
    let mut creator = MockEvaluationReportCreator::new();
    creator
        .expect_create()
        .times(1)
        .withf(move |_, report, locator| {
            report.report_type == EvaluationReportType::Shipment
                && report.shipment_id.map(|id| id.to_string()).as_deref() == Some(SHIPMENT_ID)
                && report.office_user_id == office_user_id
                && locator.as_str() == "ABC123"
        })
        .return_once(|_, new, _| {
            let mut created = report(new.id, new.report_type);
            created.shipment_id = new.shipment_id;
            Ok(created)
        });
    let mut state = fixture_state(&[]);
    state.report_creator = Arc::new(creator);
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = session_cookie(&app, &session).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/ghc/v1/moves/ABC123/evaluation-reports")
            .cookie(cookie)
            .set_json(json!({ "shipmentId": SHIPMENT_ID }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["type"], "SHIPMENT");
    assert_eq!(body["shipmentId"], SHIPMENT_ID);
}

#[actix_web::test]
async fn create_without_body_creates_counseling_report() {
    let mut creator = MockEvaluationReportCreator::new();
    creator
        .expect_create()
        .times(1)
        .withf(|_, report, _| {
            report.report_type == EvaluationReportType::Counseling && report.shipment_id.is_none()
        })
        .return_once(|_, new, _| Ok(report(new.id, new.report_type)));
    let mut state = fixture_state(&[]);
    state.report_creator = Arc::new(creator);
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = session_cookie(&app, &office_session()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/ghc/v1/moves/ABC123/evaluation-reports")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["type"], "COUNSELING");
}

#[rstest]
#[case("/ghc/v1/moves/abc/evaluation-reports", json!({}), "locator")]
#[case("/ghc/v1/moves/ABC123/evaluation-reports", json!({ "shipmentId": "nope" }), "shipmentId")]
#[case("/ghc/v1/moves/ABC123/evaluation-reports", json!({}), "shipmentId")]
#[actix_web::test]
async fn create_rejects_malformed_input(
    #[case] uri: &str,
    #[case] body: Value,
    #[case] field: &str,
) {
    let app = actix_test::init_service(test_app(fixture_state(&[]))).await;
    let cookie = session_cookie(&app, &office_session()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(uri)
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], field);
}

#[actix_web::test]
async fn create_maps_every_service_error_to_500() {
    let (logs, _guard) = LogCapture::install();
    let mut creator = MockEvaluationReportCreator::new();
    creator
        .expect_create()
        .return_once(|_, _, _| Err(ServiceError::not_found("Move", None)));
    let mut state = fixture_state(&[]);
    state.report_creator = Arc::new(creator);
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = session_cookie(&app, &office_session()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/ghc/v1/moves/ABC123/evaluation-reports")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(logs.records_for("create_evaluation_report", "ERROR").len(), 1);
}

#[actix_web::test]
async fn delete_returns_no_content() {
    let app = actix_test::init_service(test_app(fixture_state(&[]))).await;
    let cookie = session_cookie(&app, &office_session()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri(&report_uri()).cookie(cookie).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn delete_without_session_is_unauthorized() {
    let app = actix_test::init_service(test_app(fixture_state(&[]))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri(&report_uri()).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn save_checks_session_before_decoding_body() {
    let (logs, _guard) = LogCapture::install();
    let mut state = fixture_state(&[]);
    state.report_updater = Arc::new(MockEvaluationReportUpdater::new());
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&report_uri())
            .insert_header((IF_MATCH, "tag"))
            .insert_header(("content-type", "application/json"))
            .set_payload("{ remarks")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(logs.records_for("save_evaluation_report", "WARN").len(), 1);
}

#[rstest]
#[case(ServiceError::not_found("EvaluationReport", None), StatusCode::NOT_FOUND)]
#[case(ServiceError::precondition_failed(Uuid::nil()), StatusCode::PRECONDITION_FAILED)]
#[case(ServiceError::forbidden("not the author"), StatusCode::FORBIDDEN)]
#[case(ServiceError::conflict(None, "already submitted"), StatusCode::CONFLICT)]
#[case(ServiceError::invalid_input(None, "bad", FieldErrors::new()), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(ServiceError::unprocessable_entity("odd"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn save_maps_service_errors(#[case] err: ServiceError, #[case] status: StatusCode) {
    let mut updater = MockEvaluationReportUpdater::new();
    updater.expect_save().times(1).return_once(move |_, _, _| Err(err));
    let mut state = fixture_state(&[]);
    state.report_updater = Arc::new(updater);
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = session_cookie(&app, &office_session()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&report_uri())
            .cookie(cookie)
            .insert_header((IF_MATCH, "tag"))
            .set_json(json!({ "remarks": "Crew arrived late" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), status);
}

#[actix_web::test]
async fn save_threads_session_and_if_match() {
    let session = office_session();
    let office_user_id = session.office_user_id;
    let mut updater = MockEvaluationReportUpdater::new();
    updater
        .expect_save()
        .times(1)
        .withf(move |_, update, tag| {
            update.id == FixtureEvaluationReports::REPORT_ID
                && update.office_user_id == office_user_id
                && update.location == Some(InspectionLocation::Origin)
                && tag.as_str() == "MjAyNA=="
        })
        .return_once(|_, _, _| Ok(()));
    let mut state = fixture_state(&[]);
    state.report_updater = Arc::new(updater);
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = session_cookie(&app, &session).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&report_uri())
            .cookie(cookie)
            .insert_header((IF_MATCH, "MjAyNA=="))
            .set_json(json!({ "location": "ORIGIN", "inspectionDate": "2024-05-01" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[rstest]
#[case(ServiceError::not_found("EvaluationReport", None), StatusCode::NOT_FOUND)]
#[case(ServiceError::precondition_failed(Uuid::nil()), StatusCode::PRECONDITION_FAILED)]
#[case(ServiceError::forbidden("not the author"), StatusCode::FORBIDDEN)]
#[case(ServiceError::invalid_input(None, "incomplete", FieldErrors::new()), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(ServiceError::conflict(None, "already submitted"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn submit_maps_service_errors(#[case] err: ServiceError, #[case] status: StatusCode) {
    let mut updater = MockEvaluationReportUpdater::new();
    updater.expect_submit().times(1).return_once(move |_, _, _, _| Err(err));
    let mut state = fixture_state(&[]);
    state.report_updater = Arc::new(updater);
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = session_cookie(&app, &office_session()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("{}/submit", report_uri()))
            .cookie(cookie)
            .insert_header((IF_MATCH, "tag"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), status);
}

#[actix_web::test]
async fn submit_requires_if_match() {
    let app = actix_test::init_service(test_app(fixture_state(&[]))).await;
    let cookie = session_cookie(&app, &office_session()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("{}/submit", report_uri()))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

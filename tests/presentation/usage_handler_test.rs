use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use sightline::application::ports::UsageLog;
use sightline::application::services::ProcessService;
use sightline::domain::{ProviderId, UsageRecord};

use super::{app, json_body};
use crate::helpers::{
    FailingUsageLog, FakeFrameDecoder, RecordingBlobStore, RecordingNotifier, dispatcher_with,
    service_fixture,
};

fn usage_request(query: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/usage?{query}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn given_stored_records_when_querying_usage_then_returns_that_users_history() {
    let fixture = service_fixture(
        vec![],
        FakeFrameDecoder::with_frames(0),
        RecordingBlobStore::default(),
        RecordingNotifier::default(),
    );
    let _scratch = fixture.scratch_root;
    for (email, question) in [
        ("user@example.com", "first"),
        ("other@example.com", "skip"),
        ("user@example.com", "second"),
    ] {
        fixture
            .usage_log
            .insert(&UsageRecord::new(
                email.into(),
                question.into(),
                "<p>answer</p>".into(),
                String::new(),
                ProviderId::GoogleVision,
            ))
            .await
            .unwrap();
    }

    let response = app(fixture.service)
        .oneshot(usage_request("email=user%40example.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["questionText"], "first");
    assert_eq!(records[1]["questionText"], "second");
    assert_eq!(records[1]["model"], "GOOGLE_VISION");
}

#[tokio::test]
async fn given_unknown_email_when_querying_usage_then_returns_empty_list() {
    let fixture = service_fixture(
        vec![],
        FakeFrameDecoder::with_frames(0),
        RecordingBlobStore::default(),
        RecordingNotifier::default(),
    );
    let _scratch = fixture.scratch_root;

    let response = app(fixture.service)
        .oneshot(usage_request("email=nobody%40example.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn given_unreachable_usage_log_when_querying_then_returns_server_error() {
    let scratch = tempfile::tempdir().unwrap();
    let service = ProcessService::new(
        Arc::new(dispatcher_with(vec![], FakeFrameDecoder::with_frames(0))),
        Arc::new(RecordingBlobStore::default()),
        Arc::new(FailingUsageLog),
        None,
        scratch.path().to_path_buf(),
    );

    let response = app(service)
        .oneshot(usage_request("email=user%40example.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("database down"));
}

#[tokio::test]
async fn given_missing_email_parameter_when_querying_usage_then_returns_json_error() {
    let fixture = service_fixture(
        vec![],
        FakeFrameDecoder::with_frames(0),
        RecordingBlobStore::default(),
        RecordingNotifier::default(),
    );
    let _scratch = fixture.scratch_root;

    let response = app(fixture.service)
        .oneshot(Request::builder().uri("/usage").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("email"));
}

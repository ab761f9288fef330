use assert_matches::assert_matches;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use sightline::application::ports::{VisionBackend, VisionBackendError};
use sightline::domain::{FrameEncoding, FramePolicy, ProviderId};
use sightline::infrastructure::vision::{RekognitionBackend, RekognitionConfig};

use super::mock_server::image_request;

const AMZ_JSON: &str = "application/x-amz-json-1.1";

/// Serves the JSON 1.1 protocol, routing on `x-amz-target`.
async fn start_mock_rekognition(
    labels_status: u16,
    labels_body: &'static str,
    text_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/",
        post(move |headers: HeaderMap| async move {
            let target = headers
                .get("x-amz-target")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let (status, body) = if target.ends_with("DetectLabels") {
                (labels_status, labels_body)
            } else {
                (200, text_body)
            };
            (
                StatusCode::from_u16(status).unwrap(),
                [(axum::http::header::CONTENT_TYPE, AMZ_JSON)],
                body,
            )
                .into_response()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (format!("http://{addr}"), shutdown_tx)
}

async fn backend(endpoint_url: String) -> RekognitionBackend {
    RekognitionBackend::connect(RekognitionConfig {
        region: "us-east-1".into(),
        access_key_id: Some("AKIDTEST".into()),
        secret_access_key: Some("secret".into()),
        session_token: None,
        endpoint_url: Some(endpoint_url),
    })
    .await
}

#[tokio::test]
async fn given_labels_and_text_when_analyzing_then_returns_sentence() {
    let (endpoint, shutdown_tx) = start_mock_rekognition(
        200,
        r#"{"Labels":[{"Name":"Car","Confidence":99.1},{"Name":"Road","Confidence":95.0}]}"#,
        r#"{"TextDetections":[{"DetectedText":"STOP","Type":"LINE","Confidence":98.0}]}"#,
    )
    .await;

    let answer = backend(endpoint)
        .await
        .analyze(&image_request(ProviderId::AwsRekognition, FrameEncoding::RawJpeg))
        .await
        .unwrap();

    assert_eq!(
        answer,
        "This image contains: Car, Road and the following text: STOP"
    );
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_invalid_image_when_analyzing_then_returns_service_message_and_status() {
    let (endpoint, shutdown_tx) = start_mock_rekognition(
        400,
        r#"{"__type":"InvalidImageFormatException","Message":"Request has invalid image format"}"#,
        r#"{"TextDetections":[]}"#,
    )
    .await;

    let result = backend(endpoint)
        .await
        .analyze(&image_request(ProviderId::AwsRekognition, FrameEncoding::RawJpeg))
        .await;

    assert_matches!(
        result,
        Err(VisionBackendError::ApiRequestFailed { status: Some(400), ref message })
            if message == "Request has invalid image format"
    );
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_rekognition_backend_when_queried_then_uses_first_raw_frame() {
    let backend = backend("http://127.0.0.1:9".into()).await;

    assert_eq!(backend.provider(), ProviderId::AwsRekognition);
    assert_eq!(backend.frame_policy(), FramePolicy::FirstFrameOnly);
    assert_eq!(backend.frame_encoding(), FrameEncoding::RawJpeg);
}

use std::time::Duration;

use assert_matches::assert_matches;

use sightline::application::ports::{VisionBackend, VisionBackendError};
use sightline::domain::{FramePolicy, ProviderId};
use sightline::infrastructure::vision::AnthropicVisionBackend;

use super::mock_server::{start_mock_server, video_request};

fn backend(base_url: &str) -> AnthropicVisionBackend {
    AnthropicVisionBackend::new(
        base_url,
        "claude-3-opus-20240229",
        "ant-test",
        1024,
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn given_successful_message_when_analyzing_then_returns_first_text_block() {
    let server = start_mock_server(
        "/v1/messages",
        200,
        r#"{"content":[{"type":"text","text":"<ul><li>Two cars</li></ul>"}],"role":"assistant"}"#,
    )
    .await;

    let answer = backend(&server.base_url)
        .analyze(&video_request(ProviderId::Anthropic, 2))
        .await
        .unwrap();

    assert_eq!(answer, "<ul><li>Two cars</li></ul>");

    let captured = server.captured();
    assert_eq!(captured.headers.get("x-api-key").unwrap(), "ant-test");
    assert_eq!(
        captured.headers.get("anthropic-version").unwrap(),
        "2023-06-01"
    );
    assert_eq!(captured.body["max_tokens"], 1024);
}

#[test]
fn given_frames_when_building_content_then_labels_each_image_and_appends_question() {
    let content = AnthropicVisionBackend::build_content(&video_request(ProviderId::Anthropic, 2));

    assert_eq!(content.len(), 5);
    assert_eq!(content[0]["text"], "Image 1:");
    assert_eq!(content[1]["type"], "image");
    assert_eq!(content[1]["source"]["media_type"], "image/jpeg");
    assert_eq!(content[2]["text"], "Image 2:");
    assert_eq!(content[3]["type"], "image");
    assert!(
        content[4]["text"]
            .as_str()
            .unwrap()
            .contains("Who walked past?")
    );
}

#[tokio::test]
async fn given_overloaded_api_when_analyzing_then_returns_provider_error() {
    let server = start_mock_server(
        "/v1/messages",
        529,
        r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#,
    )
    .await;

    let result = backend(&server.base_url)
        .analyze(&video_request(ProviderId::Anthropic, 1))
        .await;

    assert_matches!(
        result,
        Err(VisionBackendError::ApiRequestFailed { status: Some(529), ref message }) if message == "Overloaded"
    );
}

#[test]
fn given_anthropic_backend_when_queried_then_caps_at_twenty_frames() {
    assert_eq!(
        backend("http://localhost").frame_policy(),
        FramePolicy::Sampled { max_frames: 20 }
    );
}

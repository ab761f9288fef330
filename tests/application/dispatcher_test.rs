use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;

use sightline::application::ports::VisionBackend;
use sightline::application::services::{
    BackendRegistry, DispatchError, Dispatcher, FrameSampler, ScratchSpace,
};
use sightline::domain::{FramePolicy, Outcome, ProviderId};

use crate::helpers::{FakeFrameDecoder, StubBackend, dispatcher_with, image_input, video_input};

const OPENAI_POLICY: FramePolicy = FramePolicy::Sampled { max_frames: 45 };

async fn scratch() -> (tempfile::TempDir, ScratchSpace) {
    let root = tempfile::tempdir().unwrap();
    let scratch = ScratchSpace::create_in(root.path()).await.unwrap();
    (root, scratch)
}

#[tokio::test]
async fn given_unknown_provider_when_processing_then_fails_without_calling_any_backend() {
    let backend = Arc::new(StubBackend::answering(ProviderId::OpenAi, OPENAI_POLICY, "<p>x</p>"));
    let dispatcher = dispatcher_with(vec![backend.clone()], FakeFrameDecoder::with_frames(100));
    let (_root, scratch) = scratch().await;

    let outcome = dispatcher
        .process("What is this?", &image_input(), "GEMINI", &scratch)
        .await;

    assert_eq!(outcome, Outcome::failure(400, "Invalid API selected"));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn given_known_but_unconfigured_provider_when_processing_then_reports_not_configured() {
    let dispatcher = dispatcher_with(vec![], FakeFrameDecoder::with_frames(100));
    let (_root, scratch) = scratch().await;

    let outcome = dispatcher
        .process("What is this?", &image_input(), "ASTICA", &scratch)
        .await;

    assert_eq!(outcome, Outcome::failure(400, "ASTICA is not configured"));
}

#[tokio::test]
async fn given_valid_image_when_processing_then_returns_backend_html_verbatim() {
    let answer = "<h2>Answer</h2><p>A tabby cat on a sofa.</p>";
    let backend = Arc::new(StubBackend::answering(ProviderId::OpenAi, OPENAI_POLICY, answer));
    let dispatcher = dispatcher_with(vec![backend.clone()], FakeFrameDecoder::with_frames(0));
    let (_root, scratch) = scratch().await;

    let outcome = dispatcher
        .process("What animal is this?", &image_input(), " OPENAI ", &scratch)
        .await;

    assert_eq!(outcome, Outcome::success(answer));
    assert_eq!(backend.call_count(), 1);
    assert_eq!(backend.last_frame_count(), Some(1));
}

#[tokio::test]
async fn given_video_of_exactly_warmup_length_when_processing_then_empty_input_and_no_call() {
    let backend = Arc::new(StubBackend::answering(ProviderId::OpenAi, OPENAI_POLICY, "<p>x</p>"));
    let dispatcher = dispatcher_with(vec![backend.clone()], FakeFrameDecoder::with_frames(25));
    let (_root, scratch) = scratch().await;

    let outcome = dispatcher
        .process("Who entered?", &video_input(), "OPENAI", &scratch)
        .await;

    assert!(!outcome.is_success());
    assert_eq!(outcome.status_code(), 400);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn given_video_one_frame_past_warmup_when_processing_then_sends_one_frame() {
    let backend = Arc::new(StubBackend::answering(ProviderId::OpenAi, OPENAI_POLICY, "<p>x</p>"));
    let dispatcher = dispatcher_with(vec![backend.clone()], FakeFrameDecoder::with_frames(26));
    let (_root, scratch) = scratch().await;

    let outcome = dispatcher
        .process("Who entered?", &video_input(), "OPENAI", &scratch)
        .await;

    assert!(outcome.is_success());
    assert_eq!(backend.last_frame_count(), Some(1));
}

#[tokio::test]
async fn given_long_video_when_processing_anthropic_then_caps_frames_at_twenty() {
    let backend = Arc::new(StubBackend::answering(
        ProviderId::Anthropic,
        FramePolicy::Sampled { max_frames: 20 },
        "<p>x</p>",
    ));
    let dispatcher = dispatcher_with(vec![backend.clone()], FakeFrameDecoder::with_frames(600));
    let (_root, scratch) = scratch().await;

    dispatcher
        .process("Summarise", &video_input(), "CLAUDE_ANTHROPIC", &scratch)
        .await;

    let sent = backend.last_frame_count().unwrap();
    assert!(sent <= 20 && sent > 0, "sent {sent} frames");
}

#[tokio::test]
async fn given_provider_auth_error_when_processing_then_failure_carries_provider_status_and_message() {
    let backend = Arc::new(StubBackend::failing(
        ProviderId::OpenAi,
        Some(401),
        "Incorrect API key provided",
    ));
    let dispatcher = dispatcher_with(vec![backend], FakeFrameDecoder::with_frames(0));
    let (_root, scratch) = scratch().await;

    let outcome = dispatcher
        .process("What is this?", &image_input(), "OPENAI", &scratch)
        .await;

    assert_eq!(outcome, Outcome::failure(401, "Incorrect API key provided"));
}

#[tokio::test]
async fn given_slow_backend_when_processing_then_times_out_with_gateway_status() {
    let mut backend = StubBackend::answering(ProviderId::OpenAi, OPENAI_POLICY, "<p>late</p>");
    backend.delay = Some(Duration::from_secs(30));
    let backend: Arc<dyn VisionBackend> = Arc::new(backend);

    let dispatcher = Dispatcher::new(
        BackendRegistry::new().with(backend),
        FrameSampler::new(
            Arc::new(FakeFrameDecoder::with_frames(0)),
            Duration::from_secs(5),
        ),
        Duration::from_millis(50),
    );
    let (_root, scratch) = scratch().await;

    let outcome = dispatcher
        .process("What is this?", &image_input(), "OPENAI", &scratch)
        .await;

    assert_eq!(outcome.status_code(), 504);
}

#[tokio::test]
async fn given_blank_answer_when_processing_then_reports_failure() {
    let backend = Arc::new(StubBackend::answering(ProviderId::OpenAi, OPENAI_POLICY, "   "));
    let dispatcher = dispatcher_with(vec![backend], FakeFrameDecoder::with_frames(0));
    let (_root, scratch) = scratch().await;

    let outcome = dispatcher
        .process("What is this?", &image_input(), "OPENAI", &scratch)
        .await;

    assert!(!outcome.is_success());
}

#[test]
fn given_dispatch_errors_when_converted_then_map_to_outcome_statuses() {
    assert_eq!(
        Outcome::from(DispatchError::EmptyInput { decoded: 3 }).status_code(),
        400
    );
    assert_matches!(
        Outcome::from(DispatchError::InvalidProvider("X".into())),
        Outcome::Failure { status_code: 400, ref message } if message == "Invalid API selected"
    );
}

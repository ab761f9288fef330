use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::RawQuery;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use sightline::application::ports::BackendRequest;
use sightline::domain::{EncodedFrame, FrameEncoding, FrameSequence, ProviderId};

#[derive(Debug, Clone, Default)]
pub struct CapturedRequest {
    pub headers: HeaderMap,
    pub query: Option<String>,
    pub body: serde_json::Value,
}

pub struct MockServer {
    pub base_url: String,
    pub captured: Arc<Mutex<Option<CapturedRequest>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockServer {
    pub fn captured(&self) -> CapturedRequest {
        self.captured
            .lock()
            .unwrap()
            .clone()
            .expect("mock server received no request")
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
    }
}

pub async fn start_mock_server(
    path: &str,
    response_status: u16,
    response_body: &'static str,
) -> MockServer {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let captured: Arc<Mutex<Option<CapturedRequest>>> = Arc::new(Mutex::new(None));
    let sink = captured.clone();

    let app = Router::new().route(
        path,
        post(move |headers: HeaderMap, RawQuery(query): RawQuery, body: String| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = Some(CapturedRequest {
                    headers,
                    query,
                    body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
                });
                let status = StatusCode::from_u16(response_status).unwrap();
                (
                    status,
                    [(axum::http::header::CONTENT_TYPE, "application/json")],
                    response_body,
                )
                    .into_response()
            }
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

    MockServer {
        base_url: format!("http://{addr}"),
        captured,
        shutdown: Some(shutdown_tx),
    }
}

pub fn image_request(provider: ProviderId, encoding: FrameEncoding) -> BackendRequest {
    BackendRequest {
        provider,
        prompt: "What is in the picture?".into(),
        frames: FrameSequence::single(EncodedFrame::encode(
            bytes::Bytes::from_static(b"\xff\xd8jpeg"),
            encoding,
        )),
        is_video: false,
    }
}

pub fn video_request(provider: ProviderId, frame_count: usize) -> BackendRequest {
    let frames = (0..frame_count)
        .map(|i| {
            EncodedFrame::encode(
                bytes::Bytes::from(format!("frame-{i}")),
                FrameEncoding::Base64Jpeg,
            )
        })
        .collect();
    BackendRequest {
        provider,
        prompt: "Who walked past?".into(),
        frames: FrameSequence::new(frames, frame_count + 25),
        is_video: true,
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{BackendRequest, VisionBackend, VisionBackendError};
use crate::domain::{EncodedFrame, FrameEncoding, FramePolicy, ProviderId};

use super::prompt::{frame_prompt, provider_error_message};

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicVisionBackend {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    max_tokens: u32,
}

impl AnthropicVisionBackend {
    pub const MAX_FRAMES: usize = 20;
    pub const DEFAULT_BASE_URL: &'static str = "https://api.anthropic.com";
    pub const DEFAULT_MODEL: &'static str = "claude-3-opus-20240229";
    pub const DEFAULT_MAX_TOKENS: u32 = 1024;

    pub fn new(
        base_url: &str,
        model: &str,
        api_key: &str,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self, VisionBackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.trim().to_string(),
            max_tokens,
        })
    }

    /// Each frame is preceded by an `Image N:` label; the question comes last.
    pub fn build_content(request: &BackendRequest) -> Vec<serde_json::Value> {
        let mut content = Vec::with_capacity(request.frames.len() * 2 + 1);

        for (index, frame) in request.frames.frames().iter().enumerate() {
            content.push(serde_json::json!({
                "type": "text",
                "text": format!("Image {}:", index + 1),
            }));
            content.push(serde_json::json!({
                "type": "image",
                "source": {
                    "type": "base64",
                    "media_type": EncodedFrame::MEDIA_TYPE,
                    "data": frame.as_base64(),
                }
            }));
        }

        content.push(serde_json::json!({
            "type": "text",
            "text": frame_prompt(&request.prompt, request.is_video),
        }));

        content
    }
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[async_trait]
impl VisionBackend for AnthropicVisionBackend {
    fn provider(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    fn frame_policy(&self) -> FramePolicy {
        FramePolicy::Sampled {
            max_frames: Self::MAX_FRAMES,
        }
    }

    fn frame_encoding(&self) -> FrameEncoding {
        FrameEncoding::Base64Jpeg
    }

    #[tracing::instrument(skip(self, request), fields(model = %self.model, frames = request.frames.len()))]
    async fn analyze(&self, request: &BackendRequest) -> Result<String, VisionBackendError> {
        if request.frames.is_empty() {
            return Err(VisionBackendError::EmptyInput);
        }

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{ "role": "user", "content": Self::build_content(request) }],
        });

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Anthropic returned an error");
            return Err(VisionBackendError::api(
                Some(status.as_u16()),
                provider_error_message(&text),
            ));
        }

        let message: MessagesResponse = response
            .json()
            .await
            .map_err(|e| VisionBackendError::InvalidResponse(format!("Anthropic JSON: {e}")))?;

        let answer = message
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .unwrap_or_default();

        tracing::info!(chars = answer.len(), "Anthropic vision answer received");

        Ok(answer)
    }
}

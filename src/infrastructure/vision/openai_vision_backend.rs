use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{BackendRequest, VisionBackend, VisionBackendError};
use crate::domain::{EncodedFrame, FrameEncoding, FramePolicy, ProviderId};

use super::prompt::{frame_prompt, provider_error_message};

pub struct OpenAiVisionBackend {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    max_tokens: u32,
}

impl OpenAiVisionBackend {
    pub const MAX_FRAMES: usize = 45;
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const DEFAULT_MODEL: &'static str = "gpt-4o";
    pub const DEFAULT_MAX_TOKENS: u32 = 200;

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
            api_key: api_key.to_string(),
            max_tokens,
        })
    }

    fn build_body(&self, request: &BackendRequest) -> serde_json::Value {
        let mut content = vec![serde_json::json!({
            "type": "text",
            "text": frame_prompt(&request.prompt, request.is_video),
        })];

        content.extend(request.frames.frames().iter().map(|frame| {
            serde_json::json!({
                "type": "image_url",
                "image_url": {
                    "url": format!("data:{};base64,{}", EncodedFrame::MEDIA_TYPE, frame.as_base64()),
                    "detail": "low"
                }
            })
        }));

        serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": content }],
            "max_tokens": self.max_tokens,
        })
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl VisionBackend for OpenAiVisionBackend {
    fn provider(&self) -> ProviderId {
        ProviderId::OpenAi
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

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.build_body(request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "OpenAI returned an error");
            return Err(VisionBackendError::api(
                Some(status.as_u16()),
                provider_error_message(&body),
            ));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| VisionBackendError::InvalidResponse(format!("OpenAI JSON: {e}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        tracing::info!(chars = content.len(), "OpenAI vision answer received");

        Ok(content)
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{BackendRequest, VisionBackend, VisionBackendError};
use crate::application::services::result_normalizer::astica_html;
use crate::domain::{
    AsticaAnalysis, FaceDemographics, FrameEncoding, FramePolicy, Moderation, ProviderId,
    ScoredLabel,
};

use super::prompt::frame_prompt;

pub struct AsticaBackend {
    client: Client,
    endpoint: String,
    api_key: String,
    model_version: String,
    prompt_length: u32,
}

impl AsticaBackend {
    pub const DEFAULT_ENDPOINT: &'static str = "https://vision.astica.ai/describe";
    pub const DEFAULT_MODEL_VERSION: &'static str = "2.5_full";
    pub const DEFAULT_PROMPT_LENGTH: u32 = 90;
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(100);

    pub fn new(
        endpoint: &str,
        api_key: &str,
        model_version: &str,
        prompt_length: u32,
        timeout: Duration,
    ) -> Result<Self, VisionBackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            model_version: model_version.to_string(),
            prompt_length,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AsticaResponse {
    pub error: Option<serde_json::Value>,
    pub caption: Option<Caption>,
    #[serde(rename = "caption_GPTS")]
    pub caption_gpts: Option<String>,
    pub objects: Vec<AsticaObject>,
    pub moderate: Option<AsticaModeration>,
    pub faces: Vec<AsticaFace>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Caption {
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AsticaObject {
    pub name: String,
    pub confidence: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AsticaModeration {
    pub is_adult_content: bool,
    pub is_racy_content: bool,
    pub is_gory_content: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AsticaFace {
    pub age: Option<u32>,
    pub gender: Option<String>,
}

impl From<AsticaResponse> for AsticaAnalysis {
    fn from(response: AsticaResponse) -> Self {
        let description = response
            .caption_gpts
            .filter(|c| !c.trim().is_empty())
            .or_else(|| response.caption.and_then(|c| c.text));

        Self {
            description,
            objects: response
                .objects
                .into_iter()
                .map(|o| ScoredLabel::new(o.name, o.confidence))
                .collect(),
            moderation: response.moderate.map(|m| Moderation {
                is_adult_content: m.is_adult_content,
                is_racy_content: m.is_racy_content,
                is_gory_content: m.is_gory_content,
            }),
            faces: response
                .faces
                .into_iter()
                .map(|f| FaceDemographics {
                    age: f.age,
                    gender: f.gender,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl VisionBackend for AsticaBackend {
    fn provider(&self) -> ProviderId {
        ProviderId::Astica
    }

    fn frame_policy(&self) -> FramePolicy {
        FramePolicy::FirstFrameOnly
    }

    fn frame_encoding(&self) -> FrameEncoding {
        FrameEncoding::Base64Jpeg
    }

    #[tracing::instrument(skip(self, request), fields(model_version = %self.model_version))]
    async fn analyze(&self, request: &BackendRequest) -> Result<String, VisionBackendError> {
        let frame = request.frames.first().ok_or(VisionBackendError::EmptyInput)?;

        let payload = serde_json::json!({
            "tkn": self.api_key,
            "modelVersion": self.model_version,
            "visionParams": "",
            "input": frame.as_base64(),
            "gpt_prompt": frame_prompt(&request.prompt, request.is_video),
            "prompt_length": self.prompt_length,
            "objects_custom_kw": "",
        });

        let response = self.client.post(&self.endpoint).json(&payload).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(VisionBackendError::api(
                Some(status.as_u16()),
                "Failed to connect to the API.",
            ));
        }

        let result: AsticaResponse = response
            .json()
            .await
            .map_err(|e| VisionBackendError::InvalidResponse(format!("Astica JSON: {e}")))?;

        if let Some(error) = result.error.as_ref() {
            let message = error
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            tracing::warn!(error = %message, "Astica reported an error");
            return Err(VisionBackendError::api(None, message));
        }

        Ok(astica_html(&AsticaAnalysis::from(result)))
    }
}

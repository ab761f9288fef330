use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{BackendRequest, VisionBackend, VisionBackendError};
use crate::application::services::result_normalizer::google_vision_html;
use crate::domain::{
    FaceEmotions, FrameEncoding, FramePolicy, GoogleVisionAnalysis, ProviderId, ScoredLabel,
};

use super::prompt::provider_error_message;

const FEATURES: [&str; 4] = [
    "LABEL_DETECTION",
    "OBJECT_LOCALIZATION",
    "TEXT_DETECTION",
    "FACE_DETECTION",
];

pub struct GoogleVisionBackend {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GoogleVisionBackend {
    pub const DEFAULT_BASE_URL: &'static str = "https://vision.googleapis.com";

    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, VisionBackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/v1/images:annotate", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct AnnotateBatchResponse {
    #[serde(default)]
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotateImageResponse {
    pub label_annotations: Vec<EntityAnnotation>,
    pub localized_object_annotations: Vec<LocalizedObjectAnnotation>,
    pub text_annotations: Vec<EntityAnnotation>,
    pub face_annotations: Vec<FaceAnnotation>,
    pub error: Option<Status>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EntityAnnotation {
    pub description: String,
    pub score: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LocalizedObjectAnnotation {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaceAnnotation {
    pub joy_likelihood: Option<String>,
    pub sorrow_likelihood: Option<String>,
    pub anger_likelihood: Option<String>,
    pub surprise_likelihood: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Status {
    pub code: Option<u16>,
    pub message: String,
}

impl From<AnnotateImageResponse> for GoogleVisionAnalysis {
    fn from(response: AnnotateImageResponse) -> Self {
        let likelihood = |value: Option<String>| {
            value.unwrap_or_else(|| "UNKNOWN".to_string())
        };

        Self {
            labels: response
                .label_annotations
                .into_iter()
                .map(|l| ScoredLabel::new(l.description, l.score * 100.0))
                .collect(),
            objects: response
                .localized_object_annotations
                .into_iter()
                .map(|o| ScoredLabel::new(o.name, o.score * 100.0))
                .collect(),
            texts: response
                .text_annotations
                .into_iter()
                .map(|t| t.description)
                .collect(),
            faces: response
                .face_annotations
                .into_iter()
                .map(|f| FaceEmotions {
                    joy: likelihood(f.joy_likelihood),
                    sorrow: likelihood(f.sorrow_likelihood),
                    anger: likelihood(f.anger_likelihood),
                    surprise: likelihood(f.surprise_likelihood),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl VisionBackend for GoogleVisionBackend {
    fn provider(&self) -> ProviderId {
        ProviderId::GoogleVision
    }

    fn frame_policy(&self) -> FramePolicy {
        FramePolicy::FirstFrameOnly
    }

    fn frame_encoding(&self) -> FrameEncoding {
        FrameEncoding::RawJpeg
    }

    #[tracing::instrument(skip(self, request))]
    async fn analyze(&self, request: &BackendRequest) -> Result<String, VisionBackendError> {
        let frame = request.frames.first().ok_or(VisionBackendError::EmptyInput)?;

        let features: Vec<_> = FEATURES
            .iter()
            .map(|kind| serde_json::json!({ "type": kind }))
            .collect();

        let body = serde_json::json!({
            "requests": [{
                "image": { "content": frame.as_base64() },
                "features": features,
            }]
        });

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(VisionBackendError::api(
                Some(status.as_u16()),
                provider_error_message(&text),
            ));
        }

        let batch: AnnotateBatchResponse = response
            .json()
            .await
            .map_err(|e| VisionBackendError::InvalidResponse(format!("Google Vision JSON: {e}")))?;

        let annotation = batch
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| VisionBackendError::InvalidResponse("no annotation response".into()))?;

        if let Some(error) = annotation.error.as_ref().filter(|e| !e.message.is_empty()) {
            return Err(VisionBackendError::api(
                None,
                format!("API Errors:\n{}", error.message),
            ));
        }

        let analysis = GoogleVisionAnalysis::from(annotation);
        tracing::info!(
            labels = analysis.labels.len(),
            objects = analysis.objects.len(),
            texts = analysis.texts.len(),
            faces = analysis.faces.len(),
            "Google Vision annotation received"
        );

        Ok(google_vision_html(&analysis))
    }
}

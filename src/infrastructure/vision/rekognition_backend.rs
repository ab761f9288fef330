use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_rekognition::Client;
use aws_sdk_rekognition::config::http::HttpResponse;
use aws_sdk_rekognition::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_rekognition::primitives::Blob;
use aws_sdk_rekognition::types::Image;
use futures::TryFutureExt;

use crate::application::ports::{BackendRequest, VisionBackend, VisionBackendError};
use crate::application::services::result_normalizer::rekognition_description;
use crate::domain::{FrameEncoding, FramePolicy, ProviderId, RekognitionDetections};

pub struct RekognitionBackend {
    client: Client,
}

/// Connection details for the Rekognition client. Unset credentials fall
/// back to the default AWS provider chain.
#[derive(Debug, Clone, Default)]
pub struct RekognitionConfig {
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    pub endpoint_url: Option<String>,
}

impl RekognitionBackend {
    pub const DEFAULT_REGION: &'static str = "us-east-1";

    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn connect(config: RekognitionConfig) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region));

        if let (Some(access_key_id), Some(secret_access_key)) =
            (config.access_key_id, config.secret_access_key)
        {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                config.session_token,
                None,
                "sightline-settings",
            ));
        }

        if let Some(endpoint_url) = config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config))
    }

    async fn detect(&self, jpeg: Vec<u8>) -> Result<RekognitionDetections, VisionBackendError> {
        let image = Image::builder().bytes(Blob::new(jpeg)).build();

        let (labels, texts) = futures::try_join!(
            self.client
                .detect_labels()
                .image(image.clone())
                .send()
                .map_err(|e| sdk_failure("DetectLabels", e)),
            self.client
                .detect_text()
                .image(image)
                .send()
                .map_err(|e| sdk_failure("DetectText", e)),
        )?;

        Ok(RekognitionDetections {
            labels: labels
                .labels()
                .iter()
                .filter_map(|label| label.name().map(str::to_string))
                .collect(),
            texts: texts
                .text_detections()
                .iter()
                .filter_map(|detection| detection.detected_text().map(str::to_string))
                .collect(),
        })
    }
}

fn sdk_failure<E>(operation: &str, err: SdkError<E, HttpResponse>) -> VisionBackendError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let status = err.raw_response().map(|r| r.status().as_u16());
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
    tracing::warn!(operation, status, error = %message, "Rekognition call failed");
    VisionBackendError::api(status, message)
}

#[async_trait]
impl VisionBackend for RekognitionBackend {
    fn provider(&self) -> ProviderId {
        ProviderId::AwsRekognition
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
        let jpeg = frame
            .to_jpeg_bytes()
            .map_err(|e| VisionBackendError::InvalidResponse(format!("frame encoding: {e}")))?;

        let detections = self.detect(jpeg.to_vec()).await?;
        tracing::info!(
            labels = detections.labels.len(),
            texts = detections.texts.len(),
            "Rekognition detections received"
        );

        Ok(rekognition_description(&detections))
    }
}

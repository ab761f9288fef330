use async_trait::async_trait;

use crate::domain::{
    DEFAULT_FAILURE_STATUS, FrameEncoding, FramePolicy, FrameSequence, ProviderId,
};

/// Built fresh for every request and never cached.
#[derive(Debug, Clone)]
pub struct BackendRequest {
    pub provider: ProviderId,
    pub prompt: String,
    pub frames: FrameSequence,
    pub is_video: bool,
}

#[async_trait]
pub trait VisionBackend: Send + Sync {
    fn provider(&self) -> ProviderId;

    fn frame_policy(&self) -> FramePolicy;

    fn frame_encoding(&self) -> FrameEncoding;

    /// Returns the answer as an HTML fragment.
    async fn analyze(&self, request: &BackendRequest) -> Result<String, VisionBackendError>;
}

#[derive(Debug, thiserror::Error)]
pub enum VisionBackendError {
    #[error("{message}")]
    ApiRequestFailed {
        status: Option<u16>,
        message: String,
    },
    #[error("no frames to analyze")]
    EmptyInput,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl VisionBackendError {
    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::ApiRequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Status reported by the provider, or the generic failure status.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ApiRequestFailed {
                status: Some(status),
                ..
            } => *status,
            _ => DEFAULT_FAILURE_STATUS,
        }
    }
}

impl From<reqwest::Error> for VisionBackendError {
    fn from(e: reqwest::Error) -> Self {
        Self::ApiRequestFailed {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

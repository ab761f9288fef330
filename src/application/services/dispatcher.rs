use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{BackendRequest, VisionBackend, VisionBackendError};
use crate::domain::{DEFAULT_FAILURE_STATUS, MediaInput, Outcome, ProviderId};

use super::{BackendRegistry, FrameSampler, SamplingError, ScratchSpace};

const TIMEOUT_STATUS: u16 = 504;

pub struct Dispatcher {
    registry: BackendRegistry,
    sampler: FrameSampler,
    upstream_timeout: Duration,
}

impl Dispatcher {
    pub fn new(registry: BackendRegistry, sampler: FrameSampler, upstream_timeout: Duration) -> Self {
        Self {
            registry,
            sampler,
            upstream_timeout,
        }
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Runs one request end to end and folds every failure into an [`Outcome`].
    pub async fn process(
        &self,
        prompt: &str,
        media: &MediaInput,
        provider: &str,
        scratch: &ScratchSpace,
    ) -> Outcome {
        match self.try_process(prompt, media, provider, scratch).await {
            Ok(html_body) => Outcome::success(html_body),
            Err(e) => {
                tracing::warn!(error = %e, provider, "Vision request failed");
                Outcome::from(e)
            }
        }
    }

    pub fn resolve(
        &self,
        provider: &str,
    ) -> Result<(ProviderId, Arc<dyn VisionBackend>), DispatchError> {
        let id: ProviderId = provider
            .parse()
            .map_err(|_| DispatchError::InvalidProvider(provider.trim().to_string()))?;
        let backend = self
            .registry
            .get(id)
            .ok_or(DispatchError::ProviderUnavailable(id))?;
        Ok((id, backend))
    }

    async fn try_process(
        &self,
        prompt: &str,
        media: &MediaInput,
        provider: &str,
        scratch: &ScratchSpace,
    ) -> Result<String, DispatchError> {
        let (id, backend) = self.resolve(provider)?;

        let frames = self
            .sampler
            .extract_frames(
                media,
                scratch,
                backend.frame_policy(),
                backend.frame_encoding(),
            )
            .await?;

        if frames.is_empty() {
            return Err(DispatchError::EmptyInput {
                decoded: frames.decoded_count(),
            });
        }

        tracing::info!(
            provider = %id,
            frames = frames.len(),
            decoded = frames.decoded_count(),
            is_video = media.is_video(),
            "Dispatching to vision backend"
        );

        let request = BackendRequest {
            provider: id,
            prompt: prompt.to_string(),
            frames,
            is_video: media.is_video(),
        };

        let html_body = tokio::time::timeout(self.upstream_timeout, backend.analyze(&request))
            .await
            .map_err(|_| DispatchError::Timeout(id, self.upstream_timeout))??;

        if html_body.trim().is_empty() {
            return Err(DispatchError::Upstream(VisionBackendError::InvalidResponse(
                format!("{id} returned an empty answer"),
            )));
        }

        Ok(html_body)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Invalid API selected")]
    InvalidProvider(String),
    #[error("{0} is not configured")]
    ProviderUnavailable(ProviderId),
    #[error(transparent)]
    Sampling(#[from] SamplingError),
    #[error("No frames left to analyze after sampling {decoded} decoded frames")]
    EmptyInput { decoded: usize },
    #[error("{0} did not answer within {1:?}")]
    Timeout(ProviderId, Duration),
    #[error(transparent)]
    Upstream(#[from] VisionBackendError),
}

impl DispatchError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Upstream(e) => e.status_code(),
            Self::Timeout(..) => TIMEOUT_STATUS,
            _ => DEFAULT_FAILURE_STATUS,
        }
    }
}

impl From<DispatchError> for Outcome {
    fn from(e: DispatchError) -> Self {
        Outcome::failure(e.status_code(), e.to_string())
    }
}

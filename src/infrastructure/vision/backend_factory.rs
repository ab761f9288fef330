use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::VisionBackendError;
use crate::application::services::BackendRegistry;
use crate::presentation::config::ProviderSettings;

use super::anthropic_vision_backend::AnthropicVisionBackend;
use super::astica_backend::AsticaBackend;
use super::google_vision_backend::GoogleVisionBackend;
use super::openai_vision_backend::OpenAiVisionBackend;
use super::rekognition_backend::{RekognitionBackend, RekognitionConfig};

pub struct BackendFactory;

/// A section with a blank key (e.g. `APP__PROVIDERS__OPENAI__API_KEY=`) counts as absent.
fn keyed<'a, T>(section: &'a Option<T>, api_key: impl Fn(&T) -> &str) -> Option<&'a T> {
    section.as_ref().filter(|section| {
        let present = !api_key(*section).trim().is_empty();
        if !present {
            tracing::warn!("Provider section has a blank api_key; skipping");
        }
        present
    })
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl BackendFactory {
    /// Builds a registry holding every provider that has credentials configured.
    pub async fn create(
        settings: &ProviderSettings,
        upstream_timeout: Duration,
    ) -> Result<BackendRegistry, VisionBackendError> {
        let mut registry = BackendRegistry::new();

        if let Some(openai) = keyed(&settings.openai, |s| s.api_key.as_str()) {
            tracing::info!(model = %openai.model, "Registering OpenAI vision backend");
            registry.register(Arc::new(OpenAiVisionBackend::new(
                &openai.base_url,
                &openai.model,
                &openai.api_key,
                openai.max_tokens,
                upstream_timeout,
            )?));
        }

        if let Some(anthropic) = keyed(&settings.anthropic, |s| s.api_key.as_str()) {
            tracing::info!(model = %anthropic.model, "Registering Anthropic vision backend");
            registry.register(Arc::new(AnthropicVisionBackend::new(
                &anthropic.base_url,
                &anthropic.model,
                &anthropic.api_key,
                anthropic.max_tokens,
                upstream_timeout,
            )?));
        }

        if let Some(aws) = &settings.aws {
            tracing::info!(region = %aws.region, "Registering AWS Rekognition backend");
            let backend = RekognitionBackend::connect(RekognitionConfig {
                region: aws.region.clone(),
                access_key_id: non_blank(&aws.access_key_id),
                secret_access_key: non_blank(&aws.secret_access_key),
                session_token: non_blank(&aws.session_token),
                endpoint_url: non_blank(&aws.endpoint_url),
            })
            .await;
            registry.register(Arc::new(backend));
        }

        if let Some(google) = keyed(&settings.google, |s| s.api_key.as_str()) {
            tracing::info!(base_url = %google.base_url, "Registering Google Vision backend");
            registry.register(Arc::new(GoogleVisionBackend::new(
                &google.base_url,
                &google.api_key,
                upstream_timeout,
            )?));
        }

        if let Some(astica) = keyed(&settings.astica, |s| s.api_key.as_str()) {
            tracing::info!(model_version = %astica.model_version, "Registering Astica backend");
            registry.register(Arc::new(AsticaBackend::new(
                &astica.endpoint,
                &astica.api_key,
                &astica.model_version,
                astica.prompt_length,
                Duration::from_secs(astica.timeout_secs),
            )?));
        }

        if registry.is_empty() {
            tracing::warn!("No vision backends configured; every request will be rejected");
        }

        Ok(registry)
    }
}

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{BlobStore, Notifier, UsageLog, UsageLogError};
use crate::domain::{DEFAULT_FAILURE_STATUS, MediaInput, Outcome, ProviderId, UsageRecord};

use super::{Dispatcher, ScratchSpace};

#[derive(Debug, Clone)]
pub struct ProcessRequest {
    pub prompt: String,
    pub email: String,
    pub provider: String,
    pub media: MediaInput,
}

/// Orchestrates dispatch, blob upload, usage logging and notification for one request.
pub struct ProcessService {
    dispatcher: Arc<Dispatcher>,
    blob_store: Arc<dyn BlobStore>,
    usage_log: Arc<dyn UsageLog>,
    notifier: Option<Arc<dyn Notifier>>,
    scratch_root: PathBuf,
}

impl ProcessService {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        blob_store: Arc<dyn BlobStore>,
        usage_log: Arc<dyn UsageLog>,
        notifier: Option<Arc<dyn Notifier>>,
        scratch_root: PathBuf,
    ) -> Self {
        Self {
            dispatcher,
            blob_store,
            usage_log,
            notifier,
            scratch_root,
        }
    }

    #[tracing::instrument(
        skip(self, request),
        fields(provider = %request.provider, kind = request.media.kind.as_str())
    )]
    pub async fn process(&self, request: ProcessRequest) -> Result<UsageRecord, ProcessError> {
        let scratch = ScratchSpace::create_in(&self.scratch_root)
            .await
            .map_err(ProcessError::Scratch)?;

        let outcome = self
            .dispatcher
            .process(&request.prompt, &request.media, &request.provider, &scratch)
            .await;

        let html_body = match outcome {
            Outcome::Success { html_body } => html_body,
            Outcome::Failure {
                status_code,
                message,
            } => {
                return Err(ProcessError::Failed {
                    status_code,
                    message,
                });
            }
        };

        // Only a known provider can have produced a successful outcome.
        let model = request
            .provider
            .parse::<ProviderId>()
            .map_err(|message| ProcessError::Failed {
                status_code: DEFAULT_FAILURE_STATUS,
                message,
            })?;

        let file_url = match self
            .blob_store
            .upload(&scratch.media_path(&request.media), request.media.kind)
            .await
        {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(error = %e, "Media upload failed; recording usage without a file URL");
                String::new()
            }
        };

        let record = UsageRecord::new(
            request.email,
            request.prompt,
            html_body,
            file_url,
            model,
        );

        if let Err(e) = self.usage_log.insert(&record).await {
            tracing::error!(error = %e, "Failed to persist usage record");
        }

        if let Some(notifier) = &self.notifier {
            if let Err(e) = notifier.send(&record, request.media.kind).await {
                tracing::warn!(error = %e, "Result notification failed");
            }
        }

        tracing::info!(model = %record.model, "Request processed");

        Ok(record)
    }

    pub fn providers(&self) -> Vec<ProviderId> {
        self.dispatcher.registry().providers()
    }

    pub async fn usage(&self, email: &str) -> Result<Vec<UsageRecord>, UsageLogError> {
        self.usage_log.find_by_email(email.trim()).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("scratch storage unavailable: {0}")]
    Scratch(io::Error),
    #[error("{message}")]
    Failed { status_code: u16, message: String },
}

impl ProcessError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Scratch(_) => 500,
            Self::Failed { status_code, .. } => *status_code,
        }
    }
}

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::domain::MediaKind;

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

pub struct CloudinaryBlobStore {
    client: Client,
    base_url: String,
    credentials: CloudinaryCredentials,
    folder: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    error: Option<UploadError>,
}

#[derive(Deserialize)]
struct UploadError {
    message: String,
}

impl CloudinaryBlobStore {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.cloudinary.com/v1_1";

    pub fn new(
        base_url: &str,
        credentials: CloudinaryCredentials,
        folder: &str,
    ) -> Result<Self, BlobStoreError> {
        let client = Client::builder()
            .timeout(UPLOAD_TIMEOUT)
            .build()
            .map_err(|e| BlobStoreError::InvalidConfiguration(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            folder: folder.to_string(),
        })
    }

    /// SHA-256 of the parameters sorted by name, joined as `k=v&k=v`, followed by the secret.
    pub fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
        let mut sorted = params.to_vec();
        sorted.sort_by_key(|(name, _)| *name);
        let joined = sorted
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(joined.as_bytes());
        hasher.update(api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl BlobStore for CloudinaryBlobStore {
    #[tracing::instrument(skip(self), fields(kind = kind.as_str(), cloud = %self.credentials.cloud_name))]
    async fn upload(&self, local_path: &Path, kind: MediaKind) -> Result<String, BlobStoreError> {
        let data = tokio::fs::read(local_path).await?;
        let filename = local_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = Self::sign(
            &[("folder", self.folder.as_str()), ("timestamp", timestamp.as_str())],
            &self.credentials.api_secret,
        );

        let form = Form::new()
            .part("file", Part::bytes(data).file_name(filename))
            .text("api_key", self.credentials.api_key.clone())
            .text("folder", self.folder.clone())
            .text("timestamp", timestamp)
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        let url = format!(
            "{}/{}/{}/upload",
            self.base_url,
            self.credentials.cloud_name,
            kind.as_str()
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| BlobStoreError::UploadFailed(e.to_string()))?;

        let status = response.status();
        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| BlobStoreError::UploadFailed(format!("HTTP {status}: {e}")))?;

        if let Some(error) = body.error {
            return Err(BlobStoreError::UploadFailed(error.message));
        }

        body.secure_url
            .ok_or_else(|| BlobStoreError::UploadFailed(format!("HTTP {status}: no secure_url")))
    }
}

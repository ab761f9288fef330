use std::io;
use std::path::Path;

use async_trait::async_trait;

use crate::domain::MediaKind;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Uploads the file and returns a publicly reachable URL for it.
    async fn upload(&self, local_path: &Path, kind: MediaKind) -> Result<String, BlobStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

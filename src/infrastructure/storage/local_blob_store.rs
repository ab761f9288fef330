use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};
use reqwest::Url;
use uuid::Uuid;

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::domain::MediaKind;

/// Stores uploads on local disk under `{kind}/{uuid}-{filename}`.
pub struct LocalBlobStore {
    inner: Arc<LocalFileSystem>,
    root: PathBuf,
    public_base_url: Url,
}

impl LocalBlobStore {
    pub fn new(base_path: PathBuf, public_base_url: &str) -> Result<Self, BlobStoreError> {
        let public_base_url = Url::parse(public_base_url).map_err(|e| {
            BlobStoreError::InvalidConfiguration(format!("public base url {public_base_url:?}: {e}"))
        })?;
        if public_base_url.cannot_be_a_base() {
            return Err(BlobStoreError::InvalidConfiguration(format!(
                "public base url {public_base_url} cannot carry a path"
            )));
        }
        std::fs::create_dir_all(&base_path)?;
        let fs = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| BlobStoreError::InvalidConfiguration(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            root: base_path,
            public_base_url,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_key(local_path: &Path, kind: MediaKind) -> String {
        let filename = local_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload");
        format!("{}/{}-{}", kind.as_str(), Uuid::new_v4(), filename)
    }

    /// Each stored path part becomes one percent-encoded URL segment.
    fn public_url(&self, store_path: &StorePath) -> String {
        let mut url = self.public_base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            for part in store_path.parts() {
                segments.push(part.as_ref());
            }
        }
        url.into()
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    #[tracing::instrument(skip(self), fields(kind = kind.as_str()))]
    async fn upload(&self, local_path: &Path, kind: MediaKind) -> Result<String, BlobStoreError> {
        let data = tokio::fs::read(local_path).await?;
        let key = Self::object_key(local_path, kind);
        let store_path = StorePath::from(key.as_str());

        self.inner
            .put(&store_path, PutPayload::from(data))
            .await
            .map_err(|e| BlobStoreError::UploadFailed(e.to_string()))?;

        tracing::debug!(key = %key, "Stored upload locally");
        Ok(self.public_url(&store_path))
    }
}

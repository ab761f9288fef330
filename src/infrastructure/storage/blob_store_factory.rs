use std::sync::Arc;

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::presentation::config::{StorageProviderSetting, StorageSettings};

use super::cloudinary_blob_store::{CloudinaryBlobStore, CloudinaryCredentials};
use super::local_blob_store::LocalBlobStore;

pub struct BlobStoreFactory;

impl BlobStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn BlobStore>, BlobStoreError> {
        match settings.provider {
            StorageProviderSetting::Local => {
                let store =
                    LocalBlobStore::new(settings.local_path.clone(), &settings.public_base_url)?;
                Ok(Arc::new(store))
            }
            StorageProviderSetting::Cloudinary => {
                let cloud_name = settings.cloudinary_cloud_name.clone().ok_or_else(|| {
                    BlobStoreError::InvalidConfiguration("cloudinary_cloud_name required".into())
                })?;
                let api_key = settings.cloudinary_api_key.clone().ok_or_else(|| {
                    BlobStoreError::InvalidConfiguration("cloudinary_api_key required".into())
                })?;
                let api_secret = settings.cloudinary_api_secret.clone().ok_or_else(|| {
                    BlobStoreError::InvalidConfiguration("cloudinary_api_secret required".into())
                })?;
                let store = CloudinaryBlobStore::new(
                    CloudinaryBlobStore::DEFAULT_BASE_URL,
                    CloudinaryCredentials {
                        cloud_name,
                        api_key,
                        api_secret,
                    },
                    &settings.cloudinary_folder,
                )?;
                Ok(Arc::new(store))
            }
        }
    }
}

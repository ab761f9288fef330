mod blob_store_factory;
mod cloudinary_blob_store;
mod local_blob_store;

pub use blob_store_factory::BlobStoreFactory;
pub use cloudinary_blob_store::{CloudinaryBlobStore, CloudinaryCredentials};
pub use local_blob_store::LocalBlobStore;

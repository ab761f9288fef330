mod blob_store;
mod frame_decoder;
mod notifier;
mod usage_log;
mod vision_backend;

pub use blob_store::{BlobStore, BlobStoreError};
pub use frame_decoder::{FrameDecodeError, FrameDecoder};
pub use notifier::{Notifier, NotifierError};
pub use usage_log::{UsageLog, UsageLogError};
pub use vision_backend::{BackendRequest, VisionBackend, VisionBackendError};

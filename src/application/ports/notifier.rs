use async_trait::async_trait;

use crate::domain::{MediaKind, UsageRecord};

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, record: &UsageRecord, kind: MediaKind) -> Result<(), NotifierError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("message build failed: {0}")]
    Build(String),
    #[error("transport failed: {0}")]
    Transport(String),
}

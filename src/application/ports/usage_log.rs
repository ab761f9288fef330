use async_trait::async_trait;

use crate::domain::UsageRecord;

/// Append-only log of completed requests.
#[async_trait]
pub trait UsageLog: Send + Sync {
    async fn insert(&self, record: &UsageRecord) -> Result<(), UsageLogError>;

    /// Records for `email` in the order they were inserted.
    async fn find_by_email(&self, email: &str) -> Result<Vec<UsageRecord>, UsageLogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UsageLogError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("corrupt record: {0}")]
    CorruptRecord(String),
}

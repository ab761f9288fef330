use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{UsageLog, UsageLogError};
use crate::domain::UsageRecord;

/// Process-local usage log for runs without a database.
#[derive(Default)]
pub struct InMemoryUsageLog {
    records: RwLock<Vec<UsageRecord>>,
}

impl InMemoryUsageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl UsageLog for InMemoryUsageLog {
    async fn insert(&self, record: &UsageRecord) -> Result<(), UsageLogError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<UsageRecord>, UsageLogError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|record| record.email == email)
            .cloned()
            .collect())
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::application::ports::{UsageLog, UsageLogError};
use crate::domain::{ProviderId, UsageRecord};

pub struct PgUsageLog {
    pool: PgPool,
}

impl PgUsageLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsageLog for PgUsageLog {
    #[instrument(skip(self, record), fields(model = %record.model))]
    async fn insert(&self, record: &UsageRecord) -> Result<(), UsageLogError> {
        sqlx::query(
            r#"
            INSERT INTO usage_records
                (status_code, email, question_text, answer_text, file_url, created_at, model)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(i32::from(record.status_code))
        .bind(&record.email)
        .bind(&record.question_text)
        .bind(&record.answer_text)
        .bind(&record.file_url)
        .bind(record.created_at)
        .bind(record.model.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| UsageLogError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> Result<Vec<UsageRecord>, UsageLogError> {
        let rows = sqlx::query(
            r#"
            SELECT status_code, email, question_text, answer_text, file_url, created_at, model
            FROM usage_records
            WHERE email = $1
            ORDER BY id
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UsageLogError::QueryFailed(e.to_string()))?;

        rows.iter()
            .map(|row| {
                let status_code: i32 = row
                    .try_get("status_code")
                    .map_err(|e| UsageLogError::CorruptRecord(e.to_string()))?;
                let model: String = row
                    .try_get("model")
                    .map_err(|e| UsageLogError::CorruptRecord(e.to_string()))?;
                let created_at: DateTime<Utc> = row
                    .try_get("created_at")
                    .map_err(|e| UsageLogError::CorruptRecord(e.to_string()))?;

                Ok(UsageRecord {
                    status_code: u16::try_from(status_code)
                        .map_err(|e| UsageLogError::CorruptRecord(e.to_string()))?,
                    email: row
                        .try_get("email")
                        .map_err(|e| UsageLogError::CorruptRecord(e.to_string()))?,
                    question_text: row
                        .try_get("question_text")
                        .map_err(|e| UsageLogError::CorruptRecord(e.to_string()))?,
                    answer_text: row
                        .try_get("answer_text")
                        .map_err(|e| UsageLogError::CorruptRecord(e.to_string()))?,
                    file_url: row
                        .try_get("file_url")
                        .map_err(|e| UsageLogError::CorruptRecord(e.to_string()))?,
                    created_at,
                    model: model.parse::<ProviderId>().map_err(UsageLogError::CorruptRecord)?,
                })
            })
            .collect()
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ProviderId;

/// One completed `/process` call. Never mutated once appended to the usage log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub status_code: u16,
    pub email: String,
    pub question_text: String,
    pub answer_text: String,
    pub file_url: String,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    pub model: ProviderId,
}

impl UsageRecord {
    pub fn new(
        email: String,
        question_text: String,
        answer_text: String,
        file_url: String,
        model: ProviderId,
    ) -> Self {
        Self {
            status_code: 200,
            email,
            question_text,
            answer_text,
            file_url,
            created_at: Utc::now(),
            model,
        }
    }
}

use serde::Serialize;

pub const DEFAULT_FAILURE_STATUS: u16 = 400;

/// Normalized result of one backend call, whatever the provider returned natively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { html_body: String },
    Failure { status_code: u16, message: String },
}

impl Outcome {
    pub fn success(html_body: impl Into<String>) -> Self {
        Self::Success {
            html_body: html_body.into(),
        }
    }

    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self::Failure {
            status_code,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Success { .. } => 200,
            Self::Failure { status_code, .. } => *status_code,
        }
    }
}

/// Body returned to the caller for any failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureBody {
    pub status_code: u16,
    pub message: String,
}

impl FailureBody {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }
}

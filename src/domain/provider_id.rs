use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderId {
    #[serde(rename = "OPENAI")]
    OpenAi,
    #[serde(rename = "CLAUDE_ANTHROPIC")]
    Anthropic,
    #[serde(rename = "AWS_RECOGNITION")]
    AwsRekognition,
    #[serde(rename = "GOOGLE_VISION")]
    GoogleVision,
    #[serde(rename = "ASTICA")]
    Astica,
}

impl ProviderId {
    pub const ALL: [ProviderId; 5] = [
        ProviderId::OpenAi,
        ProviderId::Anthropic,
        ProviderId::AwsRekognition,
        ProviderId::GoogleVision,
        ProviderId::Astica,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OPENAI",
            ProviderId::Anthropic => "CLAUDE_ANTHROPIC",
            ProviderId::AwsRekognition => "AWS_RECOGNITION",
            ProviderId::GoogleVision => "GOOGLE_VISION",
            ProviderId::Astica => "ASTICA",
        }
    }
}

impl FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == trimmed)
            .ok_or_else(|| format!("Invalid provider: {}", trimmed))
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

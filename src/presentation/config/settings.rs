use std::path::PathBuf;

use config::{Config, File};
use serde::Deserialize;

use crate::infrastructure::vision::{
    AnthropicVisionBackend, AsticaBackend, GoogleVisionBackend, OpenAiVisionBackend,
    RekognitionBackend,
};

use super::environment::Environment;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub timeouts: TimeoutSettings,
    #[serde(default)]
    pub scratch: ScratchSettings,
    #[serde(default)]
    pub providers: ProviderSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub email: EmailSettings,
}

impl Settings {
    /// Layers `appsettings.toml`, `appsettings.{env}.toml` and `APP__*` variables.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::with_name("appsettings").required(false))
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.profile()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,
}

fn default_max_upload_mb() -> usize {
    200
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info,sightline=debug,tower_http=debug".to_string(),
            enable_json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutSettings {
    pub upstream_secs: u64,
    pub sampling_secs: u64,
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            upstream_secs: 120,
            sampling_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScratchSettings {
    pub root: PathBuf,
    pub ffmpeg_binary: PathBuf,
}

impl Default for ScratchSettings {
    fn default() -> Self {
        Self {
            root: std::env::temp_dir().join("sightline"),
            ffmpeg_binary: PathBuf::from("ffmpeg"),
        }
    }
}

/// A provider section that is absent leaves that provider unregistered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSettings {
    pub openai: Option<OpenAiSettings>,
    pub anthropic: Option<AnthropicSettings>,
    pub aws: Option<AwsSettings>,
    pub google: Option<GoogleSettings>,
    pub astica: Option<AsticaSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    pub api_key: String,
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
    #[serde(default = "default_openai_max_tokens")]
    pub max_tokens: u32,
}

fn default_openai_base_url() -> String {
    OpenAiVisionBackend::DEFAULT_BASE_URL.to_string()
}

fn default_openai_model() -> String {
    OpenAiVisionBackend::DEFAULT_MODEL.to_string()
}

fn default_openai_max_tokens() -> u32 {
    OpenAiVisionBackend::DEFAULT_MAX_TOKENS
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicSettings {
    pub api_key: String,
    #[serde(default = "default_anthropic_base_url")]
    pub base_url: String,
    #[serde(default = "default_anthropic_model")]
    pub model: String,
    #[serde(default = "default_anthropic_max_tokens")]
    pub max_tokens: u32,
}

fn default_anthropic_base_url() -> String {
    AnthropicVisionBackend::DEFAULT_BASE_URL.to_string()
}

fn default_anthropic_model() -> String {
    AnthropicVisionBackend::DEFAULT_MODEL.to_string()
}

fn default_anthropic_max_tokens() -> u32 {
    AnthropicVisionBackend::DEFAULT_MAX_TOKENS
}

#[derive(Debug, Clone, Deserialize)]
pub struct AwsSettings {
    #[serde(default = "default_aws_region")]
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    pub endpoint_url: Option<String>,
}

fn default_aws_region() -> String {
    RekognitionBackend::DEFAULT_REGION.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleSettings {
    pub api_key: String,
    #[serde(default = "default_google_base_url")]
    pub base_url: String,
}

fn default_google_base_url() -> String {
    GoogleVisionBackend::DEFAULT_BASE_URL.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AsticaSettings {
    pub api_key: String,
    #[serde(default = "default_astica_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_astica_model_version")]
    pub model_version: String,
    #[serde(default = "default_astica_prompt_length")]
    pub prompt_length: u32,
    #[serde(default = "default_astica_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_astica_endpoint() -> String {
    AsticaBackend::DEFAULT_ENDPOINT.to_string()
}

fn default_astica_model_version() -> String {
    AsticaBackend::DEFAULT_MODEL_VERSION.to_string()
}

fn default_astica_prompt_length() -> u32 {
    AsticaBackend::DEFAULT_PROMPT_LENGTH
}

fn default_astica_timeout_secs() -> u64 {
    AsticaBackend::REQUEST_TIMEOUT.as_secs()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderSetting {
    #[default]
    Local,
    Cloudinary,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub provider: StorageProviderSetting,
    pub local_path: PathBuf,
    pub public_base_url: String,
    pub cloudinary_cloud_name: Option<String>,
    pub cloudinary_api_key: Option<String>,
    pub cloudinary_api_secret: Option<String>,
    pub cloudinary_folder: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: StorageProviderSetting::Local,
            local_path: PathBuf::from("./media"),
            public_base_url: "http://localhost:5000/media".to_string(),
            cloudinary_cloud_name: None,
            cloudinary_api_key: None,
            cloudinary_api_secret: None,
            cloudinary_folder: "John-UK".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Falls back to an in-memory usage log when unset.
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_address: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: 587,
            username: None,
            password: None,
            from_address: "Sightline <noreply@sightline.local>".to_string(),
        }
    }
}

mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AnthropicSettings, AsticaSettings, AwsSettings, DatabaseSettings, EmailSettings,
    GoogleSettings, LoggingSettings, OpenAiSettings, ProviderSettings, ScratchSettings,
    ServerSettings, Settings, SettingsError, StorageProviderSetting, StorageSettings,
    TimeoutSettings,
};

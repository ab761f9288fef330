use crate::presentation::config::{Environment, LoggingSettings};

pub const DEFAULT_FILTER: &str = "info,sightline=debug,tower_http=debug";

/// Subscriber options. `RUST_LOG` overrides `filter` when set.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: Environment,
    pub filter: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn from_settings(environment: Environment, logging: &LoggingSettings) -> Self {
        let filter = if logging.level.trim().is_empty() {
            DEFAULT_FILTER.to_string()
        } else {
            logging.level.clone()
        };
        Self {
            environment,
            filter,
            json_format: logging.enable_json,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            filter: DEFAULT_FILTER.to_string(),
            json_format: false,
        }
    }
}

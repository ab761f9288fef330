use sightline::infrastructure::observability::{DEFAULT_FILTER, TracingConfig};
use sightline::presentation::config::{Environment, LoggingSettings};

#[test]
fn given_logging_settings_when_building_config_then_copies_filter_and_format() {
    let logging = LoggingSettings {
        level: "warn,sightline=info".into(),
        enable_json: true,
    };

    let config = TracingConfig::from_settings(Environment::Prod, &logging);

    assert_eq!(config.filter, "warn,sightline=info");
    assert!(config.json_format);
    assert_eq!(config.environment, Environment::Prod);
}

#[test]
fn given_blank_level_when_building_config_then_uses_default_filter() {
    let logging = LoggingSettings {
        level: "  ".into(),
        enable_json: false,
    };

    let config = TracingConfig::from_settings(Environment::Local, &logging);

    assert_eq!(config.filter, DEFAULT_FILTER);
}

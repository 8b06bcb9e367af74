//! Config defaults: applies default values to parsed config.

use crate::schema::{LoggingConfig, OutputConfig, OutputFormat, ProdsafeConfig, ServerConfig};

/// Development server address of the analysis service.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Console log filter; stdout carries results, so only problems are logged.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: ProdsafeConfig) -> ProdsafeConfig {
    let config = apply_server_defaults(config);
    let config = apply_output_defaults(config);
    apply_logging_defaults(config)
}

fn apply_server_defaults(mut config: ProdsafeConfig) -> ProdsafeConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    if server.url.as_deref().map_or(true, |u| u.trim().is_empty()) {
        server.url = Some(DEFAULT_SERVER_URL.to_string());
    }
    config
}

fn apply_output_defaults(mut config: ProdsafeConfig) -> ProdsafeConfig {
    let output = config.output.get_or_insert_with(OutputConfig::default);
    output.format.get_or_insert(OutputFormat::Auto);
    config
}

fn apply_logging_defaults(mut config: ProdsafeConfig) -> ProdsafeConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    config
}

//! Config validation with user-friendly error messages.

use crate::schema::ProdsafeConfig;
use thiserror::Error;
use url::Url;

const KNOWN_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Emit every finding through `tracing`.
    pub fn log(&self) {
        for warning in &self.warnings {
            tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
        }
        for error in &self.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &ProdsafeConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_auth(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_server(config: &ProdsafeConfig, report: &mut ValidationReport) {
    let url = config.server_url();
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            report.error("server.url", format!("invalid URL {url:?}: {e}"));
            return;
        }
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        report.error("server.url", format!("must be http or https, got {url:?}"));
    } else if parsed.host_str().map_or(true, str::is_empty) {
        report.error("server.url", "is missing a host");
    }
}

fn validate_auth(config: &ProdsafeConfig, report: &mut ValidationReport) {
    let Some(auth) = &config.auth else { return };
    if auth.api_key.as_deref() == Some("") {
        report.warn("auth.apiKey", "API key is empty; submissions will be rejected unless --api-key is given");
    }
}

fn validate_logging(config: &ProdsafeConfig, report: &mut ValidationReport) {
    let level = config.log_level();
    // Directives such as `prodsafe_upload=debug` are passed through untouched.
    if !level.contains('=') && !KNOWN_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        report.warn("logging.level", format!("unknown log level {level:?}"));
    }
    if let Some(dir) = config.log_dir() {
        if dir.trim().is_empty() {
            report.error("logging.dir", "must not be empty when set");
        }
    }
}

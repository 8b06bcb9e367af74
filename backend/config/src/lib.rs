//! `prodsafe-config` — client configuration.
//!
//! Provides:
//! - Typed config schema (server, auth, output, logging)
//! - YAML loading from `~/.prodsafe/config.yaml` or `PRODSAFE_CONFIG_DIR`
//! - `${ENV_VAR}` substitution
//! - Default value application
//! - Validation report and redaction for display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::{apply_all_defaults, DEFAULT_LOG_LEVEL, DEFAULT_SERVER_URL};
pub use env::{
    resolve_env_vars, resolve_env_vars_with, MissingEnvVarError, ResolvedEnv, OPTIONAL_ENV_PATHS,
};
pub use io::{config_dir, config_file_path, load_config};
pub use redact::redact;
pub use schema::{AuthConfig, LoggingConfig, OutputConfig, OutputFormat, ProdsafeConfig, ServerConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Load a config file, substitute env vars, apply defaults and validate.
///
/// The report is returned rather than logged so callers can set up logging
/// from the loaded config first.
pub async fn load_and_prepare(path: &Path) -> Result<(ProdsafeConfig, ValidationReport)> {
    let raw_config = load_config(path).await?;

    let value: Value = serde_json::to_value(&raw_config)
        .context("Failed to serialize config for processing")?;
    let resolved = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;

    let config: ProdsafeConfig = serde_json::from_value(resolved.value)
        .context("Failed to deserialize config after processing")?;
    let config = apply_all_defaults(config);

    let mut report = validate(&config);
    for unset in resolved.unresolved {
        report.warn(
            unset.config_path,
            format!("env var {} is not set; using an empty value", unset.var_name),
        );
    }
    Ok((config, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("prodsafe-config-absent/config.yaml");
        let (config, report) = load_and_prepare(&path).await.unwrap();
        assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
        assert!(report.is_valid());
    }

    #[tokio::test]
    async fn unset_api_key_var_loads_with_warning() {
        let dir = std::env::temp_dir().join(format!("prodsafe-config-unset-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        std::fs::write(&path, "auth:\n  apiKey: ${PRODSAFE_TEST_NEVER_SET_KEY}\n").unwrap();

        let (config, report) = load_and_prepare(&path).await.unwrap();
        assert_eq!(config.api_key(), Some(""));
        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.path == "auth.apiKey"
            && w.message.contains("PRODSAFE_TEST_NEVER_SET_KEY")));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn unset_var_outside_auth_still_fails() {
        let dir = std::env::temp_dir().join(format!("prodsafe-config-strict-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        std::fs::write(&path, "server:\n  url: http://${PRODSAFE_TEST_NEVER_SET_HOST}\n").unwrap();

        let err = load_and_prepare(&path).await.unwrap_err();
        assert!(format!("{err:#}").contains("PRODSAFE_TEST_NEVER_SET_HOST"));

        std::fs::remove_dir_all(&dir).ok();
    }
}

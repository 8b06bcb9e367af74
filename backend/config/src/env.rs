//! Environment variable substitution for config values.
//!
//! String values may reference `${VAR_NAME}` (uppercase `[A-Z_][A-Z0-9_]*`
//! only). `$${VAR_NAME}` is kept as the literal text `${VAR_NAME}`.
//! An unset variable fails the load, except under [`OPTIONAL_ENV_PATHS`]
//! where it resolves to the empty string and is reported back.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;

/// Group 1 is the escape `$`, group 2 the variable name.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Config paths where an unset variable leaves the value empty.
/// `auth.apiKey` may be overridden by `--api-key`, and an empty key is
/// rejected at submit time.
pub const OPTIONAL_ENV_PATHS: &[&str] = &["auth.apiKey"];

/// A substituted config tree and the optional references that were unset.
#[derive(Debug)]
pub struct ResolvedEnv {
    pub value: Value,
    pub unresolved: Vec<MissingEnvVarError>,
}

/// Substitute `${VAR}` references throughout a config value tree using the
/// process environment. Unset or empty variables are an error outside
/// [`OPTIONAL_ENV_PATHS`].
pub fn resolve_env_vars(value: &Value) -> Result<ResolvedEnv> {
    resolve_env_vars_with(value, &std::env::vars().collect())
}

/// Substitute env vars using a provided map (useful for testing).
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<ResolvedEnv> {
    let mut unresolved = Vec::new();
    let value = substitute_value(value, env, "", &mut unresolved)?;
    Ok(ResolvedEnv { value, unresolved })
}

fn substitute_value(
    value: &Value,
    env: &HashMap<String, String>,
    path: &str,
    unresolved: &mut Vec<MissingEnvVarError>,
) -> Result<Value, MissingEnvVarError> {
    Ok(match value {
        Value::String(s) => Value::String(substitute_string(s, env, path, unresolved)?),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, v) in items.iter().enumerate() {
                out.push(substitute_value(v, env, &format!("{path}[{i}]"), unresolved)?);
            }
            Value::Array(out)
        }
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, v) in map {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                out.insert(key.clone(), substitute_value(v, env, &child, unresolved)?);
            }
            Value::Object(out)
        }
        other => other.clone(),
    })
}

fn substitute_string(
    s: &str,
    env: &HashMap<String, String>,
    path: &str,
    unresolved: &mut Vec<MissingEnvVarError>,
) -> Result<String, MissingEnvVarError> {
    if !s.contains("${") {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let replaced = ENV_VAR_PATTERN.replace_all(s, |caps: &Captures| {
        let name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    match missing {
        Some(err) if OPTIONAL_ENV_PATHS.contains(&path) => {
            unresolved.push(err);
            Ok(replaced.into_owned())
        }
        Some(err) => Err(err),
        None => Ok(replaced.into_owned()),
    }
}

//! Client configuration schema, typed for serde YAML/JSON.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_LOG_LEVEL, DEFAULT_SERVER_URL};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProdsafeConfig {
    /// Analysis server location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    /// Credentials forwarded with each submission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,

    /// How results are printed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Origin the `/analyze` path is resolved against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    /// Model provider API key, typically `${GOOGLE_API_KEY}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling NDJSON log files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    /// Emit console logs as JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

/// Terminal rendering of a successful result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// ANSI when the terminal supports colour, plain text otherwise.
    #[default]
    Auto,
    Ansi,
    Text,
    Html,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "ansi" => Ok(Self::Ansi),
            "text" | "plain" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            other => Err(format!("unknown output format {other:?} (expected auto, ansi, text or html)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Ansi => "ansi",
            Self::Text => "text",
            Self::Html => "html",
        })
    }
}

impl ProdsafeConfig {
    pub fn server_url(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.url.as_deref())
            .unwrap_or(DEFAULT_SERVER_URL)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.auth.as_ref().and_then(|a| a.api_key.as_deref())
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.dir.as_deref())
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_yaml() {
        let yaml = "server:\n  url: http://scan.local:8000\nauth:\n  apiKey: abc\noutput:\n  format: html\n";
        let cfg: ProdsafeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.server_url(), "http://scan.local:8000");
        assert_eq!(cfg.api_key(), Some("abc"));
        assert_eq!(cfg.output_format(), OutputFormat::Html);
    }

    #[test]
    fn accessors_fall_back_to_defaults() {
        let cfg = ProdsafeConfig::default();
        assert_eq!(cfg.server_url(), DEFAULT_SERVER_URL);
        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.output_format(), OutputFormat::Auto);
        assert!(!cfg.log_json());
    }

    #[test]
    fn output_format_from_str() {
        assert_eq!("ANSI".parse::<OutputFormat>(), Ok(OutputFormat::Ansi));
        assert_eq!("plain".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("pdf".parse::<OutputFormat>().is_err());
    }
}

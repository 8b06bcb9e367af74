//! HTTP client for the analysis endpoint.
//!
//! One multipart `POST /analyze` per call, carrying `api_key` and `image`.
//! Both response branches are JSON: `{ "result": ... }` on success and
//! `{ "error": ... }` on any non-2xx status.

use prodsafe_core::{ProdsafeError, Submission, SERVER_FALLBACK_MESSAGE};
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

/// Path of the analysis endpoint, resolved against the server origin.
pub const ANALYZE_PATH: &str = "/analyze";

const USER_AGENT: &str = concat!("prodsafe/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct AnalyzeClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl AnalyzeClient {
    /// Build a client for the server at `server_url` (e.g. `http://127.0.0.1:5000`).
    pub fn new(server_url: &str) -> Result<Self, ProdsafeError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProdsafeError::Config(format!("failed to build HTTP client: {e}")))?;
        Self::with_http_client(http, server_url)
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_http_client(http: reqwest::Client, server_url: &str) -> Result<Self, ProdsafeError> {
        Ok(Self {
            http,
            endpoint: endpoint_for(server_url)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send the submission and return the markdown report.
    pub async fn analyze(&self, submission: &Submission) -> Result<String, ProdsafeError> {
        let form = Form::new()
            .text("api_key", submission.api_key().to_string())
            .part("image", image_part(submission));

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProdsafeError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProdsafeError::Transport(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "Received analysis response");

        if !status.is_success() {
            return Err(ProdsafeError::Server(server_error_message(&body)));
        }
        parse_result(&body)
    }
}

/// Resolve `/analyze` against the server URL the way a page-relative
/// `fetch("/analyze")` would: any path on the base is replaced.
fn endpoint_for(server_url: &str) -> Result<Url, ProdsafeError> {
    let base = Url::parse(server_url)
        .map_err(|e| ProdsafeError::Config(format!("invalid server url {server_url:?}: {e}")))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(ProdsafeError::Config(format!(
            "server url must be http or https, got {server_url:?}"
        )));
    }
    base.join(ANALYZE_PATH)
        .map_err(|e| ProdsafeError::Config(format!("invalid server url {server_url:?}: {e}")))
}

fn image_part(submission: &Submission) -> Part {
    let image = submission.image();
    let part = || Part::bytes(image.data.to_vec()).file_name(image.file_name.clone());
    // An unparseable MIME type falls back to reqwest's octet-stream default.
    part().mime_str(&image.mime_type).unwrap_or_else(|_| part())
}

/// The message a failed response carries, or the generic fallback when the
/// body is not JSON or its `error` field is missing or falsy.
fn server_error_message(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|json| json.get("error").and_then(truthy_message))
        .unwrap_or_else(|| SERVER_FALLBACK_MESSAGE.to_string())
}

fn truthy_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
        _ => None,
    }
}

fn parse_result(body: &[u8]) -> Result<String, ProdsafeError> {
    let json: Value = serde_json::from_slice(body)
        .map_err(|e| ProdsafeError::Decode(format!("invalid JSON in response: {e}")))?;
    match json.get("result") {
        Some(Value::String(result)) => Ok(result.clone()),
        _ => Err(ProdsafeError::Decode("response did not include a result".to_string())),
    }
}

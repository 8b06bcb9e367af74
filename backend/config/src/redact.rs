//! Config redaction: produce safe-to-share config snapshots by masking secrets.

use logging::mask_secret;
use serde_json::Value;

/// Field names whose string values are secrets.
static SECRET_KEYS: &[&str] = &[
    "apiKey",
    "api_key",
    "apikey",
    "token",
    "accessToken",
    "access_token",
    "secret",
    "password",
];

/// Redact a config JSON value, masking every sensitive field.
///
/// The result is safe to print from `prodsafe config` or to log.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

fn is_sensitive_key(key: &str) -> bool {
    SECRET_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) if is_sensitive_key(key) && !s.is_empty() => Value::String(mask_secret(s)),
        Value::Array(items) => Value::Array(items.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_recursive(v, k)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn masks_api_key() {
        let v = json!({"auth": {"apiKey": "AIzaSyVeryLongSecret"}, "server": {"url": "http://x"}});
        let r = redact(&v);
        assert_eq!(r["auth"]["apiKey"], "AIza***");
        assert_eq!(r["server"]["url"], "http://x");
    }

    #[test]
    fn masks_short_secret_fully() {
        assert_eq!(redact(&json!({"apiKey": "abc"}))["apiKey"], "***");
    }

    #[test]
    fn empty_secret_stays_empty() {
        assert_eq!(redact(&json!({"apiKey": ""}))["apiKey"], "");
    }
}

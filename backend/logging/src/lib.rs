//! Structured logging for prodsafe.
//!
//! Handles subscriber setup (console plus optional rolling NDJSON file) and
//! scrubbing of API keys from strings before they are logged.

pub mod logger;
pub mod redact;

pub use logger::{init_logger, LoggerOptions};
pub use redact::{mask_secret, redact_sensitive_data};

use thiserror::Error;

use crate::form::VALIDATION_MESSAGE;

/// Top-level error type for the prodsafe client.
///
/// The `Display` text of the request variants is what ends up after
/// `Error: ` in the result area, so it carries no extra prefix.
#[derive(Debug, Error)]
pub enum ProdsafeError {
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,

    /// Non-2xx response; holds the server's `error` string or the fallback.
    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Transport(String),

    /// A 2xx response whose body could not be read as `{ "result": ... }`.
    #[error("{0}")]
    Decode(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ProdsafeError {
    /// Whether the error happened before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation)
    }
}

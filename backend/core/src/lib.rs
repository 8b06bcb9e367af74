pub mod error;
pub mod form;

pub use error::ProdsafeError;
pub use form::{FormInput, ImageFile, Submission, SERVER_FALLBACK_MESSAGE, VALIDATION_MESSAGE};

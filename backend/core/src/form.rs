//! Form state read at submit time and the validated submission built from it.

use std::fmt;

use bytes::Bytes;

use crate::error::ProdsafeError;

/// Shown when the key or the file is missing. No request is made.
pub const VALIDATION_MESSAGE: &str = "Please provide an API key and an image file.";

/// Used when a failed response carries no usable `error` string.
pub const SERVER_FALLBACK_MESSAGE: &str = "An error occurred.";

/// A selected file: name, MIME type and raw bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl ImageFile {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// Image bytes are noise in logs and test failures.
impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Raw form fields as the user left them.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub api_key: String,
    pub image: Option<ImageFile>,
}

impl FormInput {
    pub fn new(api_key: impl Into<String>, image: Option<ImageFile>) -> Self {
        Self {
            api_key: api_key.into(),
            image,
        }
    }
}

/// A form that passed validation and may be sent.
#[derive(Clone)]
pub struct Submission {
    api_key: String,
    image: ImageFile,
}

impl Submission {
    /// Validate the form. Only the empty string counts as a missing key;
    /// a zero-byte file still counts as a selected file.
    pub fn from_form(form: FormInput) -> Result<Self, ProdsafeError> {
        match form {
            FormInput {
                api_key,
                image: Some(image),
            } if !api_key.is_empty() => Ok(Self { api_key, image }),
            _ => Err(ProdsafeError::Validation),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn image(&self) -> &ImageFile {
        &self.image
    }
}

impl fmt::Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submission")
            .field("api_key", &"***")
            .field("image", &self.image)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> ImageFile {
        ImageFile::new("label.png", "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn accepts_key_and_file() {
        let submission = Submission::from_form(FormInput::new("abc", Some(png()))).unwrap();
        assert_eq!(submission.api_key(), "abc");
        assert_eq!(submission.image().file_name, "label.png");
    }

    #[test]
    fn rejects_empty_key() {
        let err = Submission::from_form(FormInput::new("", Some(png()))).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn rejects_missing_file() {
        let err = Submission::from_form(FormInput::new("abc", None)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn whitespace_key_is_not_empty() {
        assert!(Submission::from_form(FormInput::new("  ", Some(png()))).is_ok());
    }

    #[test]
    fn zero_byte_file_counts_as_selected() {
        let empty = ImageFile::new("blank.jpg", "image/jpeg", Vec::new());
        assert!(empty.is_empty());
        assert!(Submission::from_form(FormInput::new("abc", Some(empty))).is_ok());
    }

    #[test]
    fn debug_hides_key() {
        let submission = Submission::from_form(FormInput::new("secret-key", Some(png()))).unwrap();
        let rendered = format!("{submission:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("len: 4"));
    }
}

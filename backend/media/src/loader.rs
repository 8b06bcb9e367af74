//! Reading a picked file into an upload-ready `ImageFile`.

use std::path::Path;

use bytes::Bytes;
use prodsafe_core::{ImageFile, ProdsafeError};
use tokio::fs;
use tracing::{debug, warn};

use crate::mime_detect::{detect_mime_type, is_image, sniff_image_mime};

const FALLBACK_FILE_NAME: &str = "upload";

/// Load a file from disk, labelling it with a name and MIME type.
///
/// Returns `Ok(None)` when nothing exists at `path`, which the caller treats
/// as "no file selected". Non-image files are still returned; the server
/// decides what it accepts.
pub async fn load_image(path: &Path) -> Result<Option<ImageFile>, ProdsafeError> {
    let data = match fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Selected file does not exist");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let mut mime = detect_mime_type(path);
    if !is_image(mime) {
        if let Some(sniffed) = sniff_image_mime(&data) {
            mime = sniffed;
        } else {
            warn!(path = %path.display(), mime, "Selected file does not look like an image");
        }
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string();

    debug!(file_name = %file_name, mime, bytes = data.len(), "Loaded selected file");
    Ok(Some(ImageFile::new(file_name, mime, Bytes::from(data))))
}

//! Image file handling for uploads: MIME detection and loading from disk.

pub mod loader;
pub mod mime_detect;

pub use loader::load_image;
pub use mime_detect::{detect_mime_type, is_image, sniff_image_mime};

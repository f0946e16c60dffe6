//! Upload validation for fridge photos.
//!
//! The core pipeline assumes the bytes it receives are non-empty and of a
//! supported format; everything is checked here, at the boundary, before
//! the image is handed over.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

/// Allowed image formats for fridge photos.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Maximum upload size for photos (20MB).
pub const MAX_UPLOAD_SIZE: usize = 20 * 1024 * 1024;

/// Validate uploaded image data: non-empty, within the size cap, and of an
/// allowed format. Returns the detected content type (e.g., "image/jpeg").
pub fn validate_upload(data: &[u8]) -> Result<String, String> {
    if data.is_empty() {
        return Err("Image file is empty".to_string());
    }

    if data.len() > MAX_UPLOAD_SIZE {
        return Err(format!(
            "Image too large: {} bytes (max {})",
            data.len(),
            MAX_UPLOAD_SIZE
        ));
    }

    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| format!("Failed to read image: {}", e))?;

    let format = reader
        .format()
        .ok_or_else(|| "Could not detect image format".to_string())?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(format!(
            "Unsupported image format: {:?}. Allowed: JPEG, PNG, GIF, WebP",
            format
        ));
    }

    Ok(format.to_mime_type().to_string())
}

//! Image file and byte-buffer decoding.

use crate::error::{Error, Result};
use image::{ImageReader, RgbImage};
use std::path::Path;

/// Decode an image file into RGB pixels.
///
/// Supports the common raster formats (JPEG, PNG) in arbitrary sizes.
/// Alpha channels and grayscale inputs are converted to RGB.
pub fn decode_image_file(path: &Path) -> Result<RgbImage> {
    let reader = ImageReader::open(path).map_err(Error::Io)?;
    let decoded = reader.decode().map_err(|e| Error::ImageDecode {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(decoded.to_rgb8())
}

/// Decode an in-memory image buffer into RGB pixels.
///
/// Used by callers that receive encoded bytes instead of a file path, such
/// as an upload handler.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<RgbImage> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| Error::ImageBytesDecode { source: e })?;
    Ok(decoded.to_rgb8())
}

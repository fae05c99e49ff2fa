//! # Image Source Reading
//!
//! Reads the natural pixel dimensions of an image from a file path, a data
//! URI, or raw base64 data. Only the header is parsed; pixels are never
//! decoded because the fitting engine needs nothing but the aspect ratio.

use std::io::Cursor;

use crate::error::FitError;
use crate::model::BoxSize;

/// Natural `(width, height)` in pixels of the image at `src`.
///
/// Supported `src` formats:
/// - `data:image/...;base64,...` data URI
/// - File path (absolute or `./`/`../` relative), not on wasm32
/// - Raw base64-encoded image data
pub fn natural_dimensions(src: &str) -> Result<(u32, u32), FitError> {
    let bytes = read_source_bytes(src)?;
    dimensions_from_bytes(&bytes)
}

/// Same as [`natural_dimensions`] but as a `BoxSize`.
pub fn natural_size(src: &str) -> Result<BoxSize, FitError> {
    let (w, h) = natural_dimensions(src)?;
    Ok(BoxSize::new(w as f64, h as f64))
}

fn read_source_bytes(src: &str) -> Result<Vec<u8>, FitError> {
    let src = src.trim();
    if src.is_empty() {
        return Err(FitError::Image("empty image source".to_string()));
    }

    if src.starts_with("data:") {
        let comma = src
            .find(',')
            .ok_or_else(|| FitError::Image("invalid data URI: missing comma".to_string()))?;
        if !src[..comma].ends_with(";base64") {
            return Err(FitError::Image(
                "only base64-encoded data URIs are supported".to_string(),
            ));
        }
        return base64_decode(&src[comma + 1..]);
    }

    // Base64 contains '/', so only explicit path prefixes count as paths.
    if src.starts_with('/') || src.starts_with("./") || src.starts_with("../") {
        #[cfg(not(target_arch = "wasm32"))]
        {
            return std::fs::read(src).map_err(|e| {
                FitError::Image(format!("failed to read image file '{src}': {e}"))
            });
        }
        #[cfg(target_arch = "wasm32")]
        {
            return Err(FitError::Image(format!(
                "file path images are not supported in wasm: '{src}'"
            )));
        }
    }

    base64_decode(src)
}

fn base64_decode(input: &str) -> Result<Vec<u8>, FitError> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(input.trim())
        .map_err(|e| FitError::Image(format!("base64 decode error: {e}")))
}

fn dimensions_from_bytes(data: &[u8]) -> Result<(u32, u32), FitError> {
    let reader = image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| FitError::Image(format!("format detection failed: {e}")))?;
    if reader.format().is_none() {
        return Err(FitError::Image(
            "unsupported image format (expected JPEG, PNG or WebP)".to_string(),
        ));
    }
    reader
        .into_dimensions()
        .map_err(|e| FitError::Image(format!("failed to read image dimensions: {e}")))
}

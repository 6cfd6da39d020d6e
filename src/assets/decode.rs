use std::path::Path;

use anyhow::Context;
use image::GrayImage;
use image::imageops::FilterType;

use crate::foundation::error::{ReelError, ReelResult};

/// Decode encoded image bytes (JPEG, PNG, ...) into luma at `cols x rows`.
///
/// The image is converted to grayscale first, then resized with a bicubic filter, so every grid
/// cell gets one intensity sample.
pub fn decode_grayscale(bytes: &[u8], rows: u32, cols: u32) -> ReelResult<GrayImage> {
    if rows == 0 || cols == 0 {
        return Err(ReelError::invalid_input(format!(
            "grid resolution must be non-zero, got {rows}x{cols}"
        )));
    }
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let luma = dyn_img.to_luma8();
    if luma.width() == 0 || luma.height() == 0 {
        return Err(ReelError::invalid_input("decoded image is empty"));
    }
    Ok(image::imageops::resize(&luma, cols, rows, FilterType::CatmullRom))
}

/// Read an image file and decode it with [`decode_grayscale`].
pub fn load_grayscale(path: impl AsRef<Path>, rows: u32, cols: u32) -> ReelResult<GrayImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| ReelError::io(format!("failed to read image '{}': {e}", path.display())))?;
    decode_grayscale(&bytes, rows, cols)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{ReelError, ReelResult};

/// A rendered frame as opaque RGBA8 pixels (alpha is always 255).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// RGBA bytes of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Write the frame as a PNG, creating the parent directory if needed.
    pub fn save_png(&self, path: impl AsRef<Path>) -> ReelResult<()> {
        let path = path.as_ref();
        crate::encode::ffmpeg::ensure_parent_dir(path)?;
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))
        .map_err(|e| ReelError::io(format!("{e:#}")))
    }
}

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::schedule::TimingConfig;
use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};
use crate::grid::quantize::Cutpoints;
use crate::render::style::{Palette, RenderStyle};

/// Everything needed to turn an image into a puzzle reel.
///
/// Every field has a default, so a JSON config only needs the values it changes:
///
/// ```json
/// { "rows": 30, "cols": 30, "cutpoints": [85, 170], "cell_size_px": 32 }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReelConfig {
    /// Grid rows (source image is resized to this height).
    pub rows: u32,
    /// Grid columns (source image is resized to this width).
    pub cols: u32,
    /// One threshold for binary grids, two for ternary grids.
    pub cutpoints: Vec<i32>,
    /// Rendered side of one cell in pixels.
    pub cell_size_px: u32,
    /// Output frame rate.
    pub fps: u32,
    /// Reel length in seconds, hold included.
    pub total_duration_s: f64,
    /// Hold on the solved grid at the end, in seconds.
    pub pause_duration_s: f64,
    /// Ordinary cell border width.
    pub thin_line_px: u32,
    /// Border width on every third grid line.
    pub thick_line_px: u32,
    /// Frame colors.
    pub palette: Palette,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            cutpoints: vec![128],
            cell_size_px: 50,
            fps: 30,
            total_duration_s: 10.0,
            pause_duration_s: 3.0,
            thin_line_px: 1,
            thick_line_px: 3,
            palette: Palette::default(),
        }
    }
}

impl ReelConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelError::invalid_input(format!("parse reel config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::io(format!("open reel config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every field; the typed views below assume a validated config.
    pub fn validate(&self) -> ReelResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ReelError::invalid_input(format!(
                "grid resolution must be non-zero, got {}x{}",
                self.rows, self.cols
            )));
        }
        self.cutpoints()?;
        self.render_style().validate()?;
        self.timing()?.validate()
    }

    /// Parsed quantization cut points.
    pub fn cutpoints(&self) -> ReelResult<Cutpoints> {
        Cutpoints::new(&self.cutpoints)
    }

    /// Frame rate and durations.
    pub fn timing(&self) -> ReelResult<TimingConfig> {
        Ok(TimingConfig {
            fps: Fps::new(self.fps)?,
            total_duration_s: self.total_duration_s,
            pause_duration_s: self.pause_duration_s,
        })
    }

    /// Render geometry and palette.
    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            cell_size_px: self.cell_size_px,
            thin_line_px: self.thin_line_px,
            thick_line_px: self.thick_line_px,
            palette: self.palette,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;

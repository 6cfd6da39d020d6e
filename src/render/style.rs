use crate::foundation::core::Rgb8;
use crate::foundation::error::{ReelError, ReelResult};
use crate::grid::model::Levels;

/// Colors used to draw a grid frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Blank and not-yet-revealed cells.
    pub background: Rgb8,
    /// Cell borders.
    pub line: Rgb8,
    /// Filled cells of a binary grid.
    pub fill: Rgb8,
    /// Level 1 cells of a ternary grid.
    pub mid: Rgb8,
    /// Level 2 cells of a ternary grid; darker than `mid`.
    pub dark: Rgb8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb8::new(255, 255, 255),
            line: Rgb8::new(0, 0, 0),
            fill: Rgb8::new(0, 0, 255),
            mid: Rgb8::new(150, 150, 150),
            dark: Rgb8::new(40, 40, 40),
        }
    }
}

impl Palette {
    /// Fill color of a revealed cell with `value` in a grid of `levels`.
    pub fn color_for(&self, levels: Levels, value: u8) -> Rgb8 {
        match (levels, value) {
            (_, 0) => self.background,
            (Levels::Binary, _) => self.fill,
            (Levels::Ternary, 1) => self.mid,
            (Levels::Ternary, _) => self.dark,
        }
    }
}

/// Geometry and colors of rendered frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderStyle {
    /// Side of one cell in pixels.
    pub cell_size_px: u32,
    /// Border width on ordinary cell boundaries.
    pub thin_line_px: u32,
    /// Border width on every third boundary (3x3 block grouping).
    pub thick_line_px: u32,
    /// Colors.
    pub palette: Palette,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::with_cell_size(50)
    }
}

impl RenderStyle {
    /// Default lines and palette at the given cell size.
    pub fn with_cell_size(cell_size_px: u32) -> Self {
        Self {
            cell_size_px,
            thin_line_px: 1,
            thick_line_px: 3,
            palette: Palette::default(),
        }
    }

    /// Reject zero-sized cells and lines wider than a cell.
    pub fn validate(&self) -> ReelResult<()> {
        if self.cell_size_px == 0 {
            return Err(ReelError::invalid_input("cell_size_px must be > 0"));
        }
        if self.thin_line_px > self.cell_size_px || self.thick_line_px > self.cell_size_px {
            return Err(ReelError::invalid_input(format!(
                "line widths ({}, {}) must not exceed cell_size_px ({})",
                self.thin_line_px, self.thick_line_px, self.cell_size_px
            )));
        }
        Ok(())
    }

    /// Border width of grid line `index` (0 is the top or left edge).
    pub fn line_width(&self, index: usize) -> u32 {
        if index.is_multiple_of(3) {
            self.thick_line_px
        } else {
            self.thin_line_px
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/style.rs"]
mod tests;

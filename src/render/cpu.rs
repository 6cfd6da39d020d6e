use crate::foundation::error::{ReelError, ReelResult};
use crate::grid::model::Grid;
use crate::render::frame::FrameRGBA;
use crate::render::style::RenderStyle;

/// Active cells of a grid in reveal order (row-major), computed once per grid.
///
/// Entry `k` is the cell revealed once the threshold exceeds `k`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealOrder {
    cells: Vec<RevealCell>,
}

/// One active cell and its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealCell {
    /// Grid row.
    pub row: usize,
    /// Grid column.
    pub col: usize,
    /// Non-zero cell value.
    pub value: u8,
}

impl RevealOrder {
    /// Enumerate the active cells of `grid`.
    pub fn new(grid: &Grid) -> Self {
        let cells = grid
            .active_cells()
            .map(|(row, col)| RevealCell {
                row,
                col,
                value: grid.cells()[row * grid.cols() + col],
            })
            .collect();
        Self { cells }
    }

    /// Number of active cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` for a grid without active cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells shown at `threshold` (the first `threshold` entries).
    pub fn revealed(&self, threshold: u64) -> &[RevealCell] {
        let n = usize::try_from(threshold).unwrap_or(usize::MAX).min(self.cells.len());
        &self.cells[..n]
    }
}

/// CPU grid rasterizer powered by `vello_cpu`.
///
/// The render context and target pixmap are kept between calls and reused while the frame size
/// stays the same.
pub struct GridRenderer {
    style: RenderStyle,
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: Option<vello_cpu::Pixmap>,
}

impl GridRenderer {
    /// Create a renderer for `style`.
    pub fn new(style: RenderStyle) -> ReelResult<Self> {
        style.validate()?;
        Ok(Self {
            style,
            ctx: None,
            pixmap: None,
        })
    }

    /// Style this renderer draws with.
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Pixel size of frames for `grid`: `(cols * cell, rows * cell)`.
    pub fn frame_size(&self, grid: &Grid) -> ReelResult<(u32, u32)> {
        let cell = u64::from(self.style.cell_size_px);
        let w = (grid.cols() as u64) * cell;
        let h = (grid.rows() as u64) * cell;
        if w > u64::from(u16::MAX) || h > u64::from(u16::MAX) {
            return Err(ReelError::invalid_input(format!(
                "frame size {w}x{h} exceeds the rasterizer limit of {0}x{0}",
                u16::MAX
            )));
        }
        Ok((w as u32, h as u32))
    }

    /// Render `grid` with the first `threshold` cells of `order` revealed.
    ///
    /// `order` must come from [`RevealOrder::new`] on the same grid.
    pub fn render(
        &mut self,
        grid: &Grid,
        order: &RevealOrder,
        threshold: u64,
    ) -> ReelResult<FrameRGBA> {
        let (width, height) = self.frame_size(grid)?;
        // frame_size bounds both sides by u16::MAX.
        let (w16, h16) = (width as u16, height as u16);
        let style = self.style;
        let palette = style.palette;
        let cell = f64::from(style.cell_size_px);
        let (wf, hf) = (f64::from(width), f64::from(height));

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w16 && ctx.height() == h16 => ctx,
            _ => vello_cpu::RenderContext::new(w16, h16),
        };
        ctx.reset();
        let mut pixmap = match self.pixmap.take() {
            Some(p) if p.width() == w16 && p.height() == h16 => p,
            _ => vello_cpu::Pixmap::new(w16, h16),
        };
        clear_pixmap(&mut pixmap, palette.background.to_rgba8());

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        set_solid_paint(&mut ctx, palette.background);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, wf, hf));

        for c in order.revealed(threshold) {
            set_solid_paint(&mut ctx, palette.color_for(grid.levels(), c.value));
            let x0 = c.col as f64 * cell;
            let y0 = c.row as f64 * cell;
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(x0, y0, x0 + cell, y0 + cell));
        }

        set_solid_paint(&mut ctx, palette.line);
        for i in 0..=grid.rows() {
            let (a, b) = line_span(i as f64 * cell, style.line_width(i));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, a.max(0.0), wf, b.min(hf)));
        }
        for j in 0..=grid.cols() {
            let (a, b) = line_span(j as f64 * cell, style.line_width(j));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(a.max(0.0), 0.0, b.min(wf), hf));
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        let data = pixmap.data_as_u8_slice().to_vec();

        self.ctx = Some(ctx);
        self.pixmap = Some(pixmap);
        Ok(FrameRGBA {
            width,
            height,
            data,
        })
    }
}

/// One-shot render of `grid` at `threshold` with the default palette and lines.
pub fn render(grid: &Grid, threshold: u64, cell_size_px: u32) -> ReelResult<FrameRGBA> {
    let order = RevealOrder::new(grid);
    GridRenderer::new(RenderStyle::with_cell_size(cell_size_px))?.render(grid, &order, threshold)
}

/// Pixel span `[a, b)` of a line of `width` centered on boundary `pos`.
fn line_span(pos: f64, width: u32) -> (f64, f64) {
    let a = pos - f64::from(width / 2);
    (a, a + f64::from(width))
}

fn set_solid_paint(ctx: &mut vello_cpu::RenderContext, c: crate::foundation::core::Rgb8) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255));
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

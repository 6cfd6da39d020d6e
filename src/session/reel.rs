use std::path::{Path, PathBuf};

use crate::animation::schedule::ReelTimeline;
use crate::assets::decode::load_grayscale;
use crate::config::ReelConfig;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};
use crate::grid::model::Grid;
use crate::grid::quantize::quantize;
use crate::hints::derive::{HintSet, derive_hint_set};
use crate::render::cpu::{GridRenderer, RevealOrder};
use crate::render::frame::FrameRGBA;

/// Reel render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReelStats {
    /// Frames pushed into the sink.
    pub frames_total: u64,
    /// Frames actually rasterized.
    pub frames_rendered: u64,
    /// Frames that repeated the previous threshold and reused its raster.
    pub frames_reused: u64,
    /// Frames in the reveal ramp.
    pub animated_frames: u64,
    /// Trailing frames on the solved grid.
    pub hold_frames: u64,
}

/// Session over one immutable grid.
///
/// Construction front-loads everything that does not depend on the frame: the reveal order,
/// the timeline and the renderer. Frames are then produced on demand.
pub struct ReelSession {
    grid: Grid,
    order: RevealOrder,
    timeline: ReelTimeline,
    renderer: GridRenderer,
    fps: Fps,
}

impl ReelSession {
    /// Build a session for `grid` using the timing and style of `cfg`.
    pub fn new(grid: Grid, cfg: &ReelConfig) -> ReelResult<Self> {
        cfg.validate()?;
        let timing = cfg.timing()?;
        let order = RevealOrder::new(&grid);
        let timeline = ReelTimeline::new(order.len() as u64, &timing)?;
        let renderer = GridRenderer::new(cfg.render_style())?;
        renderer.frame_size(&grid)?;
        tracing::debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            active = order.len(),
            animated = timeline.animated().len(),
            hold = timeline.hold_frames(),
            "reel timeline ready"
        );
        Ok(Self {
            grid,
            order,
            timeline,
            renderer,
            fps: timing.fps,
        })
    }

    /// The grid being revealed.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Frame thresholds of the whole reel.
    pub fn timeline(&self) -> &ReelTimeline {
        &self.timeline
    }

    /// Row and column hints of the grid.
    pub fn hints(&self) -> HintSet {
        derive_hint_set(&self.grid)
    }

    /// Frame size in pixels.
    pub fn frame_size(&self) -> ReelResult<(u32, u32)> {
        self.renderer.frame_size(&self.grid)
    }

    /// Every frame of the reel.
    pub fn full_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.timeline.len_frames()),
        }
    }

    /// Render one timeline frame.
    pub fn render_frame(&mut self, frame: FrameIndex) -> ReelResult<FrameRGBA> {
        let threshold = self.timeline.threshold_at(frame).ok_or_else(|| {
            ReelError::invalid_input(format!(
                "frame {} is outside the reel ({} frames)",
                frame.0,
                self.timeline.len_frames()
            ))
        })?;
        self.renderer.render(&self.grid, &self.order, threshold)
    }

    /// Render the fully revealed grid.
    pub fn render_solved(&mut self) -> ReelResult<FrameRGBA> {
        self.renderer
            .render(&self.grid, &self.order, self.order.len() as u64)
    }

    /// Render `range` and stream it into `sink` in frame order.
    ///
    /// `sink.end` is only called when every frame was accepted.
    #[tracing::instrument(skip(self, sink), fields(frames = range.len_frames()))]
    pub fn render_range(
        &mut self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
    ) -> ReelResult<ReelStats> {
        if range.is_empty() {
            return Err(ReelError::encoding("render range must be non-empty"));
        }
        if range.end.0 > self.timeline.len_frames() {
            return Err(ReelError::invalid_input(format!(
                "render range end {} exceeds the reel ({} frames)",
                range.end.0,
                self.timeline.len_frames()
            )));
        }

        let (width, height) = self.frame_size()?;
        sink.begin(SinkConfig {
            width,
            height,
            fps: self.fps,
        })?;

        let animated = self.timeline.animated().len() as u64;
        let mut stats = ReelStats::default();
        let mut last: Option<(u64, FrameRGBA)> = None;
        for f in range.start.0..range.end.0 {
            let idx = FrameIndex(f);
            let threshold = self
                .timeline
                .threshold_at(idx)
                .ok_or_else(|| ReelError::invalid_input("frame outside reel"))?;
            let frame = match last.take() {
                Some((t, frame)) if t == threshold => {
                    stats.frames_reused += 1;
                    frame
                }
                _ => {
                    stats.frames_rendered += 1;
                    self.renderer.render(&self.grid, &self.order, threshold)?
                }
            };
            sink.push_frame(idx, &frame)?;
            last = Some((threshold, frame));

            stats.frames_total += 1;
            if f < animated {
                stats.animated_frames += 1;
            } else {
                stats.hold_frames += 1;
            }
        }
        sink.end()?;
        Ok(stats)
    }

    /// Render the whole reel into `sink`.
    pub fn render_all(&mut self, sink: &mut dyn FrameSink) -> ReelResult<ReelStats> {
        let range = self.full_range();
        self.render_range(range, sink)
    }
}

/// Render the complete reel of `grid` into `sink`.
pub fn render_reel(
    grid: &Grid,
    cfg: &ReelConfig,
    sink: &mut dyn FrameSink,
) -> ReelResult<ReelStats> {
    ReelSession::new(grid.clone(), cfg)?.render_all(sink)
}

/// Decode, resize and quantize the image at `path` according to `cfg`.
pub fn grid_from_image(path: impl AsRef<Path>, cfg: &ReelConfig) -> ReelResult<Grid> {
    cfg.validate()?;
    let pixels = load_grayscale(path, cfg.rows, cfg.cols)?;
    quantize(&pixels, &cfg.cutpoints()?)
}

/// Result of [`generate_reel`].
#[derive(Clone, Debug)]
pub struct ReelOutput {
    /// The quantized puzzle grid.
    pub grid: Grid,
    /// Row and column hints.
    pub hints: HintSet,
    /// Render statistics.
    pub stats: ReelStats,
    /// Written MP4 path.
    pub out_path: PathBuf,
}

/// Image in, puzzle hints and solving MP4 out.
///
/// `ffmpeg` must be on `PATH`. On failure no output file is left behind.
#[tracing::instrument(skip_all, fields(image = %image_path.as_ref().display()))]
pub fn generate_reel(
    image_path: impl AsRef<Path>,
    cfg: &ReelConfig,
    out_path: impl Into<PathBuf>,
) -> ReelResult<ReelOutput> {
    let out_path = out_path.into();
    let grid = grid_from_image(image_path.as_ref(), cfg)?;
    let hints = derive_hint_set(&grid);

    let mut session = ReelSession::new(grid, cfg)?;
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(out_path.clone()));
    let stats = session.render_all(&mut sink)?;
    tracing::info!(
        path = %out_path.display(),
        frames = stats.frames_total,
        rendered = stats.frames_rendered,
        "wrote reel"
    );

    Ok(ReelOutput {
        grid: session.grid().clone(),
        hints,
        stats,
        out_path,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/session/reel.rs"]
mod tests;

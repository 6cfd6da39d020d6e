//! nonogram-reel turns a raster image into a nonogram (picross) puzzle and renders a video that
//! solves it cell by cell.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: image bytes -> luma matrix resized to the grid resolution ([`load_grayscale`])
//! 2. **Quantize**: luma -> [`Grid`] with 2 or 3 levels ([`quantize`])
//! 3. **Hints**: [`Grid`] -> [`HintSet`] of run lengths per row/column and level
//! 4. **Schedule**: active-cell count -> [`ReelTimeline`] of per-frame reveal thresholds
//! 5. **Render**: (grid, threshold) -> [`FrameRGBA`] on the CPU via `vello_cpu`
//! 6. **Encode**: frames -> MP4 through the system `ffmpeg` binary ([`FfmpegSink`])
//!
//! Every stage is a pure transformation over an immutable grid snapshot. IO happens only at the
//! two ends: reading the source image and writing the video.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod config;
mod foundation;
mod grid;
mod hints;
mod render;
mod session;

pub mod encode;

pub use animation::schedule::{
    MAX_REEL_FRAMES, ReelTimeline, RevealSchedule, TimingConfig, schedule, schedule_frames,
};
pub use assets::decode::{decode_grayscale, load_grayscale};
pub use config::ReelConfig;
pub use encode::ffmpeg::{
    FfmpegSink, FfmpegSinkOpts, assemble_mp4, ensure_parent_dir, is_ffmpeg_on_path,
};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Fps, FrameIndex, FrameRange, Rgb8};
pub use foundation::error::{ReelError, ReelResult};
pub use grid::model::{Grid, Levels};
pub use grid::quantize::{Cutpoints, quantize, quantize_rows};
pub use hints::derive::{Hint, HintSet, LevelHints, derive_hint_set, derive_hints};
pub use render::cpu::{GridRenderer, RevealCell, RevealOrder, render};
pub use render::frame::FrameRGBA;
pub use render::style::{Palette, RenderStyle};
pub use session::reel::{
    ReelOutput, ReelSession, ReelStats, generate_reel, grid_from_image, render_reel,
};

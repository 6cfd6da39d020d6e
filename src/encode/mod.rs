//! Encoding sinks.
//!
//! Sinks consume rendered frames in timeline order and are fed by [`crate::render_reel`].

/// `ffmpeg`-based MP4 output via the system `ffmpeg` binary.
pub mod ffmpeg;
/// Generic frame sink trait and built-in sinks.
pub mod sink;

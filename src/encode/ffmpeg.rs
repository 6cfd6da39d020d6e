use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
}

impl FfmpegSinkOpts {
    /// Create options for outputting an MP4 to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw frames to stdin.
///
/// Output is H.264 / yuv420p MP4 without audio. Frames must be opaque. Odd sizes are padded by
/// one pixel on the right or bottom edge. If the sink is dropped or fails before `end` succeeds,
/// ffmpeg is killed and the partial output file is removed.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    frames_written: u64,
    output_started: bool,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            cfg: None,
            last_idx: None,
            frames_written: 0,
            output_started: false,
        }
    }

    /// Frames accepted since `begin`.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    fn discard_partial_output(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }
        if self.output_started {
            self.output_started = false;
            if let Err(e) = std::fs::remove_file(&self.opts.out_path) {
                tracing::warn!(
                    path = %self.opts.out_path.display(),
                    "failed to remove partial output: {e}"
                );
            }
        }
        self.cfg = None;
    }

    fn fail(&mut self, err: ReelError) -> ReelError {
        self.discard_partial_output();
        err
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        if self.child.is_some() {
            return Err(ReelError::encoding("ffmpeg sink already started"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(ReelError::encoding(
                "ffmpeg sink width/height must be non-zero",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(ReelError::io(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(ReelError::encoding(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        // Probe writability up front so an unwritable path surfaces as an IO error.
        std::fs::File::create(&self.opts.out_path).map_err(|e| {
            ReelError::io(format!(
                "cannot write output file '{}': {e}",
                self.opts.out_path.display()
            ))
        })?;
        self.output_started = true;

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .args(encoder_args(&cfg, &self.opts.out_path));

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                return Err(self.fail(ReelError::encoding(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))));
            }
        };

        let stdin = child.stdin.take();
        let stderr = child.stderr.take();
        self.child = Some(child);
        let (Some(stdin), Some(mut stderr)) = (stdin, stderr) else {
            return Err(self.fail(ReelError::encoding(
                "failed to open ffmpeg stdio pipes (unexpected)",
            )));
        };
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::debug!(
            path = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.get(),
            "spawned ffmpeg"
        );

        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.frames_written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(ReelError::encoding("ffmpeg sink not started"));
        };
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(self.fail(ReelError::encoding(
                "ffmpeg sink received out-of-order frame index",
            )));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(self.fail(ReelError::encoding(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            ))));
        }
        if frame.data.len() != (cfg.width as usize) * (cfg.height as usize) * 4 {
            return Err(self.fail(ReelError::encoding(
                "frame.data size mismatch with width*height*4",
            )));
        }
        if frame.data.chunks_exact(4).any(|px| px[3] != 255) {
            return Err(self.fail(ReelError::encoding(format!(
                "frame {} has non-opaque pixels",
                idx.0
            ))));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(ReelError::encoding("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        if let Err(e) = stdin.write_all(&frame.data) {
            return Err(self.fail(ReelError::encoding(format!(
                "failed to write frame to ffmpeg stdin: {e}"
            ))));
        }
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        if self.frames_written == 0 {
            return Err(self.fail(ReelError::encoding(
                "refusing to finalize an mp4 with zero frames",
            )));
        }
        drop(self.stdin.take());
        let Some(mut child) = self.child.take() else {
            return Err(ReelError::encoding("ffmpeg sink not started"));
        };

        let status = match child.wait() {
            Ok(status) => status,
            Err(e) => {
                return Err(self.fail(ReelError::encoding(format!(
                    "failed to wait for ffmpeg to finish: {e}"
                ))));
            }
        };
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => match handle.join() {
                Ok(Ok(bytes)) => bytes,
                Ok(Err(e)) => {
                    return Err(self.fail(ReelError::encoding(format!(
                        "ffmpeg stderr read failed: {e}"
                    ))));
                }
                Err(_) => {
                    return Err(self.fail(ReelError::encoding(
                        "ffmpeg stderr drain thread panicked",
                    )));
                }
            },
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(self.fail(ReelError::encoding(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            ))));
        }

        tracing::debug!(
            path = %self.opts.out_path.display(),
            frames = self.frames_written,
            "ffmpeg finished"
        );
        self.output_started = false;
        self.cfg = None;
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if self.child.is_some() || self.output_started {
            self.discard_partial_output();
        }
    }
}

/// Encode an ordered frame sequence into an MP4 at `fps`.
///
/// All frames must share the first frame's size. An empty sequence is an encoding error.
pub fn assemble_mp4<'a>(
    frames: impl IntoIterator<Item = &'a FrameRGBA>,
    fps: Fps,
    out_path: impl Into<PathBuf>,
) -> ReelResult<u64> {
    let mut frames = frames.into_iter().peekable();
    let Some(first) = frames.peek() else {
        return Err(ReelError::encoding("cannot assemble a video from zero frames"));
    };
    let cfg = SinkConfig {
        width: first.width,
        height: first.height,
        fps,
    };

    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(out_path));
    sink.begin(cfg)?;
    for (i, frame) in frames.enumerate() {
        sink.push_frame(FrameIndex(i as u64), frame)?;
    }
    sink.end()?;
    Ok(sink.frames_written())
}

/// Command-line arguments for encoding rawvideo RGBA from stdin into `out_path`.
fn encoder_args(cfg: &SinkConfig, out_path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        // The writability probe in `begin` created the file, so ffmpeg always overwrites it.
        "-y",
        "-loglevel",
        "error",
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgba",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push("-s".into());
    args.push(format!("{}x{}", cfg.width, cfg.height).into());
    // For rawvideo input, `-r` goes before `-i`.
    args.push("-r".into());
    args.push(cfg.fps.get().to_string().into());
    args.extend(
        [
            "-i",
            "pipe:0",
            "-an",
            // yuv420p needs even sides.
            "-vf",
            "pad=ceil(iw/2)*2:ceil(ih/2)*2",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]
        .into_iter()
        .map(OsString::from),
    );
    args.push(out_path.as_os_str().to_owned());
    args
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            ReelError::io(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;

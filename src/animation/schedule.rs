use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};

/// Longest reel accepted, in frames (ten hours at 30 fps).
pub const MAX_REEL_FRAMES: u64 = 1_080_000;

fn check_frame_count(frames: u64) -> ReelResult<()> {
    if frames > MAX_REEL_FRAMES {
        return Err(ReelError::invalid_input(format!(
            "reel of {frames} frames exceeds the limit of {MAX_REEL_FRAMES}"
        )));
    }
    Ok(())
}

/// Per-frame reveal thresholds for the animated part of a reel.
///
/// `step(f)` is the number of active cells, in row-major order, shown as solved at frame `f`.
/// Steps never decrease.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealSchedule {
    steps: Vec<u64>,
}

impl RevealSchedule {
    /// Number of animated frames.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` when there are no animated frames.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Threshold at animated frame `f`.
    pub fn step(&self, f: usize) -> Option<u64> {
        self.steps.get(f).copied()
    }

    /// All thresholds in frame order.
    pub fn steps(&self) -> &[u64] {
        &self.steps
    }
}

/// Linear reveal ramp over `fps * animated_secs` frames.
///
/// Each frame records `floor(counter)` and then advances the counter by
/// `total_active / (fps * animated_secs)`. Truncation can leave the last step short of
/// `total_active`; callers append an explicit fully revealed frame.
pub fn schedule(total_active: u64, fps: Fps, animated_secs: f64) -> ReelResult<RevealSchedule> {
    if !animated_secs.is_finite() || animated_secs < 0.0 {
        return Err(ReelError::invalid_input(format!(
            "animated duration must be finite and >= 0, got {animated_secs}"
        )));
    }
    let frames = fps.secs_to_frames_floor(animated_secs);
    schedule_frames(total_active, frames)
}

/// Same ramp as [`schedule`], for an explicit animated frame count of at most
/// [`MAX_REEL_FRAMES`].
pub fn schedule_frames(total_active: u64, frames: u64) -> ReelResult<RevealSchedule> {
    check_frame_count(frames)?;
    let cells_per_frame = if frames > 0 {
        total_active as f64 / frames as f64
    } else {
        0.0
    };

    let mut steps = Vec::with_capacity(frames as usize);
    let mut counter = 0.0f64;
    for _ in 0..frames {
        steps.push((counter.floor() as u64).min(total_active));
        counter += cells_per_frame;
    }
    Ok(RevealSchedule { steps })
}

/// Frame rate and durations of a reel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingConfig {
    /// Output frame rate.
    pub fps: Fps,
    /// Full reel length in seconds, hold included.
    pub total_duration_s: f64,
    /// Trailing hold on the solved grid, in seconds.
    pub pause_duration_s: f64,
}

impl TimingConfig {
    /// Reject non-finite or negative durations, a hold longer than the reel and reels longer
    /// than [`MAX_REEL_FRAMES`].
    pub fn validate(&self) -> ReelResult<()> {
        for (name, v) in [
            ("total_duration_s", self.total_duration_s),
            ("pause_duration_s", self.pause_duration_s),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ReelError::invalid_input(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        if self.pause_duration_s > self.total_duration_s {
            return Err(ReelError::invalid_input(format!(
                "pause_duration_s ({}) exceeds total_duration_s ({})",
                self.pause_duration_s, self.total_duration_s
            )));
        }
        check_frame_count(self.fps.secs_to_frames_floor(self.total_duration_s))
    }
}

/// Complete reel timeline: the reveal ramp followed by hold frames on the solved grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReelTimeline {
    total_active: u64,
    animated: RevealSchedule,
    hold_frames: u64,
}

impl ReelTimeline {
    /// Build the timeline for a grid with `total_active` active cells.
    ///
    /// Frame counts are derived so that `animated + hold == floor(fps * total)` exactly.
    pub fn new(total_active: u64, timing: &TimingConfig) -> ReelResult<Self> {
        timing.validate()?;
        let total_frames = timing.fps.secs_to_frames_floor(timing.total_duration_s);
        let hold_frames = timing
            .fps
            .secs_to_frames_floor(timing.pause_duration_s)
            .min(total_frames);
        let mut animated = schedule_frames(total_active, total_frames - hold_frames)?;
        // Without a hold the reel must still end on the solved grid.
        if hold_frames == 0
            && let Some(last) = animated.steps.last_mut()
        {
            *last = total_active;
        }
        Ok(Self {
            total_active,
            animated,
            hold_frames,
        })
    }

    /// Active cells in the grid this timeline reveals.
    pub fn total_active(&self) -> u64 {
        self.total_active
    }

    /// The animated ramp.
    pub fn animated(&self) -> &RevealSchedule {
        &self.animated
    }

    /// Frames that repeat the fully revealed grid.
    pub fn hold_frames(&self) -> u64 {
        self.hold_frames
    }

    /// Animated plus hold frames.
    pub fn len_frames(&self) -> u64 {
        self.animated.len() as u64 + self.hold_frames
    }

    /// Reveal threshold at `frame`, or `None` past the end.
    pub fn threshold_at(&self, frame: FrameIndex) -> Option<u64> {
        let animated = self.animated.len() as u64;
        if frame.0 < animated {
            return self.animated.step(frame.0 as usize);
        }
        if frame.0 < self.len_frames() {
            return Some(self.total_active);
        }
        None
    }

    /// Thresholds of every frame in order.
    pub fn thresholds(&self) -> impl Iterator<Item = u64> + '_ {
        self.animated
            .steps()
            .iter()
            .copied()
            .chain(std::iter::repeat_n(
                self.total_active,
                self.hold_frames as usize,
            ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/schedule.rs"]
mod tests;

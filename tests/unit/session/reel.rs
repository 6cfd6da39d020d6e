use super::*;
use crate::encode::sink::InMemorySink;
use crate::grid::model::Levels;

fn scenario_cfg() -> ReelConfig {
    ReelConfig {
        fps: 2,
        total_duration_s: 3.0,
        pause_duration_s: 1.0,
        cell_size_px: 32,
        ..ReelConfig::default()
    }
}

fn checkerboard() -> Grid {
    Grid::from_rows(Levels::Binary, &[[1u8, 0, 1], [0, 1, 0], [1, 0, 1]]).unwrap()
}

struct FailingSink {
    fail_at: u64,
    ended: bool,
}

impl FrameSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> ReelResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, _frame: &FrameRGBA) -> ReelResult<()> {
        if idx.0 == self.fail_at {
            return Err(ReelError::encoding("boom"));
        }
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[test]
fn scenario_reel_has_four_animated_and_two_hold_frames() {
    let mut sink = InMemorySink::new();
    let stats = render_reel(&checkerboard(), &scenario_cfg(), &mut sink).unwrap();

    assert_eq!(stats.frames_total, 6);
    assert_eq!(stats.animated_frames, 4);
    assert_eq!(stats.hold_frames, 2);
    // Thresholds 0,1,2,3,5,5: the second hold frame reuses the first.
    assert_eq!(stats.frames_rendered, 5);
    assert_eq!(stats.frames_reused, 1);

    assert!(sink.is_ended());
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height, cfg.fps.get()), (96, 96, 2));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3, 4, 5]);

    let solved = crate::render::cpu::render(&checkerboard(), 5, 32).unwrap();
    assert_eq!(sink.frames()[4].1, solved);
    assert_eq!(sink.frames()[5].1, solved);
    assert_ne!(sink.frames()[3].1, solved);
}

#[test]
fn all_zero_reel_is_blank_throughout() {
    let grid = Grid::from_rows(Levels::Binary, &[[0u8, 0], [0, 0]]).unwrap();
    let mut sink = InMemorySink::new();
    let stats = render_reel(&grid, &scenario_cfg(), &mut sink).unwrap();
    assert_eq!(stats.frames_total, 6);
    assert_eq!(stats.frames_rendered, 1);

    let blank = crate::render::cpu::render(&grid, 0, 32).unwrap();
    assert!(sink.frames().iter().all(|(_, f)| *f == blank));
}

#[test]
fn default_config_frame_count_is_fps_times_total() {
    let grid = Grid::from_cells(10, 10, Levels::Binary, (0..100).map(|i| (i % 3 == 0) as u8).collect())
        .unwrap();
    let cfg = ReelConfig {
        cell_size_px: 4,
        ..ReelConfig::default()
    };
    let mut sink = InMemorySink::new();
    let stats = render_reel(&grid, &cfg, &mut sink).unwrap();
    assert_eq!(stats.frames_total, 300);
    assert_eq!(stats.animated_frames, 210);
    assert_eq!(stats.hold_frames, 90);
    assert_eq!(sink.frames().len(), 300);
}

#[test]
fn single_frames_match_streamed_frames() {
    let mut session = ReelSession::new(checkerboard(), &scenario_cfg()).unwrap();
    let mut sink = InMemorySink::new();
    session.render_all(&mut sink).unwrap();
    for (idx, frame) in sink.frames() {
        assert_eq!(&session.render_frame(*idx).unwrap(), frame);
    }
    assert_eq!(session.render_solved().unwrap(), sink.frames()[5].1);
}

#[test]
fn out_of_reel_requests_are_rejected() {
    let mut session = ReelSession::new(checkerboard(), &scenario_cfg()).unwrap();
    assert!(matches!(
        session.render_frame(FrameIndex(6)),
        Err(ReelError::InvalidInput(_))
    ));

    let mut sink = InMemorySink::new();
    let too_long = FrameRange::new(FrameIndex(0), FrameIndex(7)).unwrap();
    assert!(session.render_range(too_long, &mut sink).is_err());
    let empty = FrameRange::new(FrameIndex(2), FrameIndex(2)).unwrap();
    assert!(matches!(
        session.render_range(empty, &mut sink),
        Err(ReelError::Encoding(_))
    ));
}

#[test]
fn sink_errors_propagate_without_finalizing() {
    let mut sink = FailingSink {
        fail_at: 3,
        ended: false,
    };
    let err = render_reel(&checkerboard(), &scenario_cfg(), &mut sink).unwrap_err();
    assert!(matches!(err, ReelError::Encoding(_)));
    assert!(!sink.ended);
}

#[test]
fn session_rejects_invalid_config() {
    let cfg = ReelConfig {
        pause_duration_s: 5.0,
        ..scenario_cfg()
    };
    assert!(ReelSession::new(checkerboard(), &cfg).is_err());
}

#[test]
fn session_exposes_hints() {
    let session = ReelSession::new(checkerboard(), &scenario_cfg()).unwrap();
    let hints = session.hints();
    assert_eq!(hints.rows_for(1).unwrap()[1].runs(), &[1]);
    assert_eq!(session.timeline().len_frames(), 6);
}

#[test]
fn session_rejects_reels_too_long_to_schedule() {
    let cfg = ReelConfig {
        total_duration_s: 1e12,
        pause_duration_s: 0.0,
        ..scenario_cfg()
    };
    assert!(matches!(
        ReelSession::new(checkerboard(), &cfg),
        Err(ReelError::InvalidInput(_))
    ));
}

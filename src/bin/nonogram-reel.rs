use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nonogram_reel::{FrameIndex, ReelConfig, ReelSession};

#[derive(Parser, Debug)]
#[command(name = "nonogram-reel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the row/column hints of the puzzle as JSON.
    Hints(HintsArgs),
    /// Write the solved grid as a PNG.
    Preview(PreviewArgs),
    /// Render a single reel frame as a PNG.
    Frame(FrameArgs),
    /// Render the solving reel as an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

/// Options shared by every subcommand. Flags override values from `--config`.
#[derive(Args, Debug)]
struct PuzzleArgs {
    /// Input image (JPEG or PNG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Reel config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid rows.
    #[arg(long)]
    rows: Option<u32>,

    /// Grid columns.
    #[arg(long)]
    cols: Option<u32>,

    /// One (binary) or two (ternary) thresholds in [0, 255], comma separated.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    cutpoints: Option<Vec<i32>>,

    /// Cell size in pixels.
    #[arg(long)]
    cell_size: Option<u32>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Total reel duration in seconds, hold included.
    #[arg(long)]
    duration: Option<f64>,

    /// Hold on the solved grid in seconds.
    #[arg(long)]
    pause: Option<f64>,
}

#[derive(Args, Debug)]
struct HintsArgs {
    #[command(flatten)]
    puzzle: PuzzleArgs,

    /// Write hints JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    puzzle: PuzzleArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    puzzle: PuzzleArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    puzzle: PuzzleArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the hints JSON here.
    #[arg(long)]
    hints_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Hints(args) => cmd_hints(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn load_config(args: &PuzzleArgs) -> anyhow::Result<ReelConfig> {
    let mut cfg = match &args.config {
        Some(path) => ReelConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => ReelConfig::default(),
    };
    if let Some(v) = args.rows {
        cfg.rows = v;
    }
    if let Some(v) = args.cols {
        cfg.cols = v;
    }
    if let Some(v) = &args.cutpoints {
        cfg.cutpoints = v.clone();
    }
    if let Some(v) = args.cell_size {
        cfg.cell_size_px = v;
    }
    if let Some(v) = args.fps {
        cfg.fps = v;
    }
    if let Some(v) = args.duration {
        cfg.total_duration_s = v;
    }
    if let Some(v) = args.pause {
        cfg.pause_duration_s = v;
    }
    cfg.validate().context("validate config")?;
    Ok(cfg)
}

fn load_grid(args: &PuzzleArgs, cfg: &ReelConfig) -> anyhow::Result<nonogram_reel::Grid> {
    nonogram_reel::grid_from_image(&args.in_path, cfg)
        .with_context(|| format!("build puzzle from '{}'", args.in_path.display()))
}

fn open_session(args: &PuzzleArgs) -> anyhow::Result<ReelSession> {
    let cfg = load_config(args)?;
    let grid = load_grid(args, &cfg)?;
    Ok(ReelSession::new(grid, &cfg)?)
}

fn write_hints(hints: &nonogram_reel::HintSet, out: Option<&Path>) -> anyhow::Result<()> {
    let json = hints.to_json_pretty().context("serialize hints")?;
    match out {
        Some(path) => {
            nonogram_reel::ensure_parent_dir(path)?;
            std::fs::write(path, json + "\n")
                .with_context(|| format!("write hints '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_hints(args: HintsArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.puzzle)?;
    let grid = load_grid(&args.puzzle, &cfg)?;
    write_hints(&nonogram_reel::derive_hint_set(&grid), args.out.as_deref())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.puzzle)?;
    let frame = session.render_solved()?;
    frame.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.puzzle)?;
    let frame = session.render_frame(FrameIndex(args.frame))?;
    frame.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.puzzle)?;
    let out = nonogram_reel::generate_reel(&args.puzzle.in_path, &cfg, &args.out)?;
    if let Some(path) = args.hints_out.as_deref() {
        write_hints(&out.hints, Some(path))?;
    }
    eprintln!(
        "wrote {} ({} frames, {} rendered)",
        out.out_path.display(),
        out.stats.frames_total,
        out.stats.frames_rendered
    );
    Ok(())
}

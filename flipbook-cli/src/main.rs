use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flipbook", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print frame timing and canvas size as JSON.
    Inspect(InspectArgs),
    /// Write every resolved frame as a PNG.
    Extract(ExtractArgs),
    /// Play the animation headless in real time, logging each frame.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input GIF.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Input GIF.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out: PathBuf,

    /// Copy patches verbatim instead of alpha-blending them.
    #[arg(long, default_value_t = false)]
    replace: bool,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input GIF.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Player config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Loop playback (overrides the config).
    #[arg(long = "loop", default_value_t = false)]
    looping: bool,

    /// Stop after this many seconds.
    #[arg(long)]
    seconds: Option<f64>,

    /// Start on this frame instead of frame 0.
    #[arg(long)]
    start: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Extract(args) => cmd_extract(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn read_gif(path: &Path) -> anyhow::Result<flipbook::DecodedGif> {
    let bytes = std::fs::read(path).with_context(|| format!("read gif '{}'", path.display()))?;
    Ok(flipbook::decode_gif(&bytes)?)
}

fn composite_opts(decoded: &flipbook::DecodedGif, replace: bool) -> flipbook::CompositeOptions {
    flipbook::CompositeOptions {
        blend: if replace {
            flipbook::BlendMode::Replace
        } else {
            flipbook::BlendMode::Over
        },
        canvas_floor: Some(decoded.screen),
    }
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let decoded = read_gif(&args.in_path)?;
    let frames = flipbook::composite_with(&decoded.patches, &composite_opts(&decoded, false))?;
    let summary = flipbook::AnimationSummary::from_frames(&frames);
    println!("{}", summary.to_json_pretty()?);
    Ok(())
}

fn cmd_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let decoded = read_gif(&args.in_path)?;
    let frames =
        flipbook::composite_with(&decoded.patches, &composite_opts(&decoded, args.replace))?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;
    for frame in &frames {
        let path = args.out.join(format!("frame_{:04}.png", frame.index()));
        frame
            .image()
            .save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
    }

    eprintln!("wrote {} frames to {}", frames.len(), args.out.display());
    Ok(())
}

/// Headless surface: logs what a display would show.
struct LogSurface {
    label: String,
}

impl flipbook::PlayerSink for LogSurface {
    fn present(&mut self, frame: &flipbook::ResolvedFrame) -> flipbook::FlipbookResult<()> {
        tracing::info!(frame = frame.index(), time = %self.label, "present");
        Ok(())
    }

    fn time_label(&mut self, label: &str) -> flipbook::FlipbookResult<()> {
        label.clone_into(&mut self.label);
        Ok(())
    }

    fn play_state(&mut self, playing: bool) -> flipbook::FlipbookResult<()> {
        tracing::info!(playing, "play state");
        Ok(())
    }
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => flipbook::PlayerConfig::from_path(path)?,
        None => flipbook::PlayerConfig::default(),
    };
    if args.looping {
        config.looping = true;
    }
    if args.seconds.is_none() && config.looping {
        anyhow::bail!("looping playback needs --seconds");
    }

    let decoded = read_gif(&args.in_path)?;
    let mut player = flipbook::Player::new(
        flipbook::SystemClock::new(),
        LogSurface {
            label: String::new(),
        },
        config,
    );
    player.load_with(&decoded.patches, &composite_opts(&decoded, false))?;
    if let Some(start) = args.start {
        player.seek(start)?;
        player.play()?;
    }

    let limit = args
        .seconds
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("invalid --seconds")?;
    let delivered = player.run(limit)?;

    eprintln!(
        "stopped at frame {} of {} after {delivered} clock events",
        player.frame_index() + 1,
        player.frame_count()
    );
    Ok(())
}

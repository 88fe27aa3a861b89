use clap::Parser;
use flexi_logger::Logger;
use std::path::PathBuf;

use redball::{ConsolePresenter, DetectionPipeline, DetectorConfig, FrameLoop, ImageSequenceSource};

#[derive(Parser)]
#[command(name = "redball")]
#[command(about = "Track a red ball through a sequence of frames")]
struct Cli {
    /// Frame images, or directories of frames (read in file name order)
    #[arg(value_name = "FRAMES", required = true)]
    inputs: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON file with detector settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Smallest enclosing radius (pixels) reported as a ball
    #[arg(long)]
    min_radius: Option<f32>,

    /// Size of the elliptical cleanup kernel (odd)
    #[arg(long)]
    kernel_size: Option<u32>,

    /// Save intermediate masks to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Save annotated frames to directory
    #[arg(long, value_name = "DIR")]
    overlay_out: Option<PathBuf>,

    /// Read at most this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Stop after presenting this many frames
    #[arg(long)]
    stop_after: Option<u64>,

    /// Print one status line per frame instead of updating in place
    #[arg(long)]
    lines: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let level = if args.verbose { "debug" } else { "info" };
    let _logger = Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .start()?;

    let mut config = match &args.config {
        Some(path) => DetectorConfig::from_json_file(path)?,
        None => DetectorConfig::default(),
    };
    if let Some(min_radius) = args.min_radius {
        config = config.with_min_radius(min_radius);
    }
    if let Some(kernel_size) = args.kernel_size {
        config = config.with_kernel_size(kernel_size);
    }

    // The source must produce frames before anything else starts
    let mut source = ImageSequenceSource::open(&args.inputs)?.with_max_frames(args.max_frames);

    let pipeline = DetectionPipeline::new(config)?;
    let mut frame_loop = FrameLoop::new(pipeline);
    if let Some(debug_dir) = args.debug_out {
        frame_loop = frame_loop.with_debug(debug_dir)?;
    }

    let mut presenter = ConsolePresenter::new(std::io::stdout().lock())
        .with_line_mode(args.lines)
        .with_stop_after(args.stop_after)
        .with_overlay_dir(args.overlay_out)?;

    let summary = frame_loop.run(&mut source, &mut presenter)?;
    drop(presenter);

    println!();
    println!("=== Tracking Summary ===");
    println!("Frames processed: {}", summary.frames);
    println!("Ball found: {}", summary.valid);
    println!("Noise only: {}", summary.noise);
    println!("No red region: {}", summary.no_region);
    println!("Stopped by: {:?}", summary.stop_reason);

    Ok(())
}

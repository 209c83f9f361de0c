use anyhow::{bail, Context};
use clap::Parser;
use masktrack::{TrackerConfig, TrackingMode};
use redact::{
    DetectionLog, DetectionSource, FrameSink, FrameSource, MaskSource, RedactConfig,
    RedactionPipeline,
};
use std::path::PathBuf;

/// Track people across a clip and cover their heads with a mask
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory of input frames, processed in file name order
    #[arg(long)]
    frames: PathBuf,

    /// JSON Lines file with one detection record per frame
    #[arg(long)]
    detections: PathBuf,

    /// Output directory for composited frames
    #[arg(long)]
    output: PathBuf,

    /// JSON run configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tracking mode (single or multi); applies the full preset unless --config is given
    #[arg(long)]
    mode: Option<TrackingMode>,

    /// Which detector records feed the tracker (poses or faces)
    #[arg(long, value_parser = parse_source)]
    source: Option<DetectionSource>,

    /// Glyph to draw as the mask, needs --font
    #[arg(long, requires = "font", conflicts_with = "mask_image")]
    glyph: Option<String>,

    /// TrueType/OpenType font used for --glyph
    #[arg(long)]
    font: Option<PathBuf>,

    /// Image to composite as the mask
    #[arg(long)]
    mask_image: Option<PathBuf>,
}

fn parse_source(s: &str) -> Result<DetectionSource, String> {
    match s.to_ascii_lowercase().as_str() {
        "poses" | "pose" => Ok(DetectionSource::Poses),
        "faces" | "face" => Ok(DetectionSource::Faces),
        other => Err(format!("unknown detection source '{}'", other)),
    }
}

fn mask_from_args(args: &Args) -> Option<MaskSource> {
    if let Some(path) = &args.mask_image {
        return Some(MaskSource::Image { path: path.clone() });
    }
    match (&args.glyph, &args.font) {
        (Some(symbol), Some(font_path)) => Some(MaskSource::Glyph {
            symbol: symbol.clone(),
            font_path: font_path.clone(),
            color: [255, 204, 0, 255],
        }),
        _ => None,
    }
}

fn build_config(args: &Args) -> anyhow::Result<RedactConfig> {
    let mask = mask_from_args(args);
    let mut config = match (&args.config, mask) {
        (Some(path), mask) => {
            let mut config = RedactConfig::from_path(path)
                .with_context(|| format!("loading config {}", path.display()))?;
            if let Some(mask) = mask {
                config.mask = mask;
            }
            config
        }
        (None, Some(mask)) => RedactConfig::new(mask),
        (None, None) => bail!("no mask given: pass --mask-image, --glyph with --font, or --config"),
    };

    // Presets only without a config file, otherwise just the mode changes
    match (args.mode, &args.config) {
        (Some(TrackingMode::Single), None) => config.tracker = TrackerConfig::single_target(),
        (Some(TrackingMode::Multi), None) => config.tracker = TrackerConfig::multi_target(),
        (Some(mode), Some(_)) => config.tracker.tracking_mode = mode,
        (None, _) => {}
    }
    if let Some(source) = args.source {
        config.detections_format = source;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    log::info!("redact v{}", redact::version());

    let config = build_config(&args)?;
    let detections = DetectionLog::from_path(&args.detections)
        .with_context(|| format!("reading detections {}", args.detections.display()))?;
    let mut source = FrameSource::open(&args.frames)?;
    let mut sink = FrameSink::create(&args.output)?;

    let mut pipeline = RedactionPipeline::from_config(&config)?;
    let stats = pipeline.run(&mut source, &detections, &mut sink)?;

    println!(
        "Wrote {} frames to {} ({} masks drawn)",
        stats.frames,
        sink.dir().display(),
        stats.masks_drawn
    );
    Ok(())
}

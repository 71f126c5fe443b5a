//! Renders one hairstyle overlay frame to a PNG.
//!
//! Usage:
//!   hairline -o out.png                          # built-in face, default style
//!   hairline --landmarks face.json --style long  # tracker output as {x, y} array
//!   hairline --profile settings.json --asset hair.svg

use std::path::PathBuf;

use clap::Parser;
use hairline_renderer::{
    AssetSource, Configurable, HairColor, HairStyle, LandmarkSet, OverlayProfile, OverlaySession,
    PixmapSurface, RenderConfig, Result, SurfaceSize,
};
use tracing::{Level, info};

#[derive(Parser, Debug)]
#[command(name = "hairline")]
#[command(author, version, about = "Landmark-anchored hairstyle overlay renderer", long_about = None)]
struct Args {
    /// Landmark JSON file (array of normalized {x, y} points). Uses a
    /// synthetic frontal face when omitted.
    #[arg(short, long)]
    landmarks: Option<PathBuf>,

    /// Overlay profile JSON. Flags below override it.
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Hair asset (PNG, JPEG or SVG). Switches to asset mode.
    #[arg(short, long)]
    asset: Option<PathBuf>,

    /// Output PNG
    #[arg(short, long, default_value = "hairline.png")]
    output: PathBuf,

    #[arg(long, default_value = "1280")]
    width: u32,

    #[arg(long, default_value = "720")]
    height: u32,

    #[arg(long, value_enum)]
    style: Option<HairStyle>,

    /// Hair color as #rrggbb
    #[arg(long)]
    color: Option<HairColor>,

    /// Opacity percent (0-100)
    #[arg(long)]
    opacity: Option<u32>,

    /// Scale percent (25-300)
    #[arg(long)]
    scale: Option<u32>,

    #[arg(long, allow_negative_numbers = true)]
    offset_x: Option<f32>,

    #[arg(long, allow_negative_numbers = true)]
    offset_y: Option<f32>,

    /// Draw unmirrored (camera-natural orientation)
    #[arg(long)]
    no_mirror: bool,

    /// Print the effective profile as JSON
    #[arg(long)]
    print_profile: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn overrides(&self, mut config: RenderConfig) -> RenderConfig {
        if let Some(style) = self.style {
            config = config.with_style(style);
        }
        if let Some(color) = self.color {
            config = config.with_color(color);
        }
        if let Some(pct) = self.opacity {
            config = config.with_opacity(pct as f32 / 100.0);
        }
        if let Some(pct) = self.scale {
            config = config.with_scale(pct as f32 / 100.0);
        }
        if self.offset_x.is_some() || self.offset_y.is_some() {
            config = config.with_offset(
                self.offset_x.unwrap_or(config.offset_x),
                self.offset_y.unwrap_or(config.offset_y),
            );
        }
        if self.no_mirror {
            config = config.with_mirror(false);
        }
        config
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut session = OverlaySession::default();
    if let Some(path) = &args.profile {
        let profile = OverlayProfile::from_json(&std::fs::read_to_string(path)?)?;
        session.apply_profile(&profile);
        info!(path = %path.display(), "profile applied");
    }
    session.update(|config| args.overrides(config));

    if let Some(path) = &args.asset {
        session.load_asset(AssetSource::Path(path.clone()))?;
    }

    let landmarks = match &args.landmarks {
        Some(path) => serde_json::from_str::<LandmarkSet>(&std::fs::read_to_string(path)?)?,
        None => LandmarkSet::canonical(session.indices()),
    };
    info!(points = landmarks.len(), "landmarks ready");

    if args.print_profile {
        println!("{}", session.export_profile().to_json_pretty()?);
    }

    let mut surface = PixmapSurface::new(SurfaceSize::new(args.width, args.height))?;
    let report = session.render_frame(&mut surface, Some(&landmarks));
    surface.save_png(&args.output)?;

    eprintln!(
        "{}: {:?} -> {}",
        report.status,
        report.path,
        args.output.display()
    );
    Ok(())
}

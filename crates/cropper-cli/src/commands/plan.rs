use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use cropper_core::aspect::AspectRatio;
use cropper_core::cropper::Cropper;
use cropper_core::geometry::Rect;
use cropper_core::io::{load_source_image, save_image, save_state};
use cropper_core::render::spawn_render;

use super::{describe, load_config_or_default};

#[derive(Clone, Copy, ValueEnum)]
pub enum FlipAxis {
    /// Mirror left to right
    H,
    /// Mirror top to bottom
    V,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Input image file
    pub file: PathBuf,

    /// Editing surface size in points, e.g. 1000x1000
    #[arg(long, value_parser = parse_surface, default_value = "1000x1000")]
    pub surface: Rect,

    /// Aspect ratio token (ORIGINAL, FREEFORM, SQUARE or W:H)
    #[arg(long)]
    pub aspect: Option<String>,

    /// Number of quarter turns
    #[arg(long, default_value = "0")]
    pub rotate: u32,

    /// Turn counter-clockwise instead of clockwise
    #[arg(long)]
    pub ccw: bool,

    /// Mirror the photo
    #[arg(long, value_enum)]
    pub flip: Option<FlipAxis>,

    /// Straighten angle in degrees
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    pub straighten: f64,

    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output crop state (JSON)
    #[arg(short, long, default_value = "crop.json")]
    pub output: PathBuf,

    /// Also render the crop to this image file
    #[arg(long)]
    pub render: Option<PathBuf>,
}

fn parse_surface(s: &str) -> std::result::Result<Rect, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("bad width: {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("bad height: {e}"))?;
    if !(w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()) {
        return Err(format!("surface must be positive, got {w}x{h}"));
    }
    Ok(Rect::new(0.0, 0.0, w, h))
}

pub fn run(args: &PlanArgs) -> Result<()> {
    let config = load_config_or_default(args.config.as_ref())?;
    let source = load_source_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let size = source.display_size();
    println!(
        "Loaded {} ({}x{}, {:?})",
        describe(&args.file),
        size.width,
        size.height,
        source.orientation
    );

    let mut cropper = Cropper::load(&source, args.surface, config, None);

    for _ in 0..args.rotate % 4 {
        cropper.rotate90(!args.ccw);
        cropper.complete_animation();
    }
    if let Some(axis) = args.flip {
        cropper.flip(matches!(axis, FlipAxis::H));
    }
    if args.straighten != 0.0 {
        cropper.set_straighten_angle(args.straighten.to_radians());
    }
    if let Some(ref token) = args.aspect {
        let ratio = AspectRatio::from_token(token);
        if ratio == AspectRatio::FreeForm && token != "FREEFORM" {
            bail!("Unknown aspect ratio '{token}'");
        }
        if !cropper.set_aspect_ratio(ratio) {
            bail!("Aspect ratio {ratio} cannot be applied to this image");
        }
        cropper.complete_animation();
    }

    let state = cropper.save_state();
    save_state(&state, &args.output)
        .with_context(|| format!("Failed to write state to {}", args.output.display()))?;
    println!("Crop box:    {}", state.crop_box);
    println!("Angle:       {:.2} deg", state.angle.to_degrees());
    println!("State saved to {}", args.output.display());

    if let Some(ref out) = args.render {
        let job = spawn_render(Arc::new(source), state, cropper.config().render)?;
        let img = job.wait()?;
        save_image(&img, out).with_context(|| format!("Failed to save {}", out.display()))?;
        println!("Rendered {}x{} to {}", img.width(), img.height(), out.display());
    }

    Ok(())
}

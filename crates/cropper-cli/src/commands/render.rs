use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use cropper_core::io::{load_source_image, load_state, save_image};
use cropper_core::render::spawn_render;
use tracing::info;

use super::{describe, load_config_or_default};

#[derive(Args)]
pub struct RenderArgs {
    /// Input image file
    pub file: PathBuf,

    /// Crop state saved by `cropper plan`
    #[arg(long)]
    pub state: PathBuf,

    /// TOML config file (output size limits)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output image path
    #[arg(short, long, default_value = "cropped.png")]
    pub output: PathBuf,
}

pub fn run(args: &RenderArgs) -> Result<()> {
    let config = load_config_or_default(args.config.as_ref())?;
    let state = load_state(&args.state)
        .with_context(|| format!("Failed to read crop state {}", args.state.display()))?;
    let source = load_source_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    println!("Rendering {} with {}", describe(&args.file), describe(&args.state));
    info!(crop_box = %state.crop_box, angle = state.angle, "Rendering saved crop");

    let job = spawn_render(Arc::new(source), state, config.render)?;
    let img = job.wait().context("Render failed")?;
    save_image(&img, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;
    println!("Saved {}x{} to {}", img.width(), img.height(), args.output.display());

    Ok(())
}

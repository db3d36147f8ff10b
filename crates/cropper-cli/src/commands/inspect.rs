use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use cropper_core::io::load_state;
use cropper_core::state::CropState;
use serde::Serialize;

#[derive(Args)]
pub struct InspectArgs {
    /// Crop state file (JSON)
    pub file: PathBuf,

    /// Second state to compare against
    #[arg(long)]
    pub compare: Option<PathBuf>,
}

/// Human-facing digest of a crop state.
#[derive(Serialize)]
struct Summary {
    surface: String,
    crop_box: String,
    angle_deg: f64,
    straighten_deg: f64,
    quarter_turns: u8,
    orientation: String,
    zoom: f64,
    aspect_ratio: String,
    aspect_locked: bool,
}

impl Summary {
    fn new(state: &CropState) -> Self {
        Self {
            surface: state.surface_frame.to_string(),
            crop_box: state.crop_box.to_string(),
            angle_deg: round2(state.angle.to_degrees()),
            straighten_deg: round2(state.straighten_angle.to_degrees()),
            quarter_turns: cropper_core::angle::quarter_turns(state.rotation_angle),
            orientation: format!("{:?}", state.image_orientation),
            zoom: round2(state.zoom_scale),
            aspect_ratio: state.aspect_ratio.to_token(),
            aspect_locked: state.aspect_ratio_locked,
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn read(path: &Path) -> Result<CropState> {
    load_state(path).with_context(|| format!("Failed to read crop state {}", path.display()))
}

pub fn run(args: &InspectArgs) -> Result<()> {
    let state = read(&args.file)?;
    print!("{}", toml::to_string_pretty(&Summary::new(&state))?);

    if let Some(ref other_path) = args.compare {
        let other = read(other_path)?;
        if state.is_equivalent(&other) {
            println!("Equivalent to {}", other_path.display());
        } else {
            println!("Differs from {}", other_path.display());
        }
    }

    Ok(())
}

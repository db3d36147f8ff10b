use std::fs;
use std::path::Path;

use crate::config::CropperConfig;
use crate::error::Result;
use crate::state::CropState;

pub fn load_state(path: &Path) -> Result<CropState> {
    let json = fs::read_to_string(path)?;
    CropState::from_json(&json)
}

pub fn save_state(state: &CropState, path: &Path) -> Result<()> {
    fs::write(path, state.to_json()?)?;
    Ok(())
}

/// Read a TOML config. Missing keys take their defaults.
pub fn load_config(path: &Path) -> Result<CropperConfig> {
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

pub fn save_config(config: &CropperConfig, path: &Path) -> Result<()> {
    fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}

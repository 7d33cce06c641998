pub mod check;
pub mod config;
pub mod decode;
pub mod devices;
pub mod scan;

use std::path::Path;

use anyhow::{Context, Result};
use scanner_core::camera::ReplayCamera;
use scanner_core::config::ScannerConfig;

/// Load the scanner config (or defaults) and build the replay camera it
/// describes. Relative frame paths resolve against the config's directory.
pub fn load_rig(config_path: Option<&Path>) -> Result<(ScannerConfig, ReplayCamera)> {
    let Some(path) = config_path else {
        let config = ScannerConfig::default();
        let camera = ReplayCamera::from_config(&config.camera, None);
        return Ok((config, camera));
    };

    let config = ScannerConfig::load(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let camera = ReplayCamera::from_config(&config.camera, path.parent());
    Ok((config, camera))
}

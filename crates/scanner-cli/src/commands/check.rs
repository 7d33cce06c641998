use std::path::Path;

use anyhow::{bail, Result};
use scanner_core::permission::PermissionGate;
use scanner_core::routing::{Navigator, Route};

/// Run the permission gate and report whether the scan screen is reachable.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let (_config, camera) = super::load_rig(config_path)?;

    let mut gate = PermissionGate::new();
    let state = gate.check_camera_availability(&camera);
    println!("{state}");

    let mut nav = Navigator::new();
    if let Err(e) = nav.navigate(Route::Scanner, &gate) {
        bail!("{e}");
    }
    Ok(())
}

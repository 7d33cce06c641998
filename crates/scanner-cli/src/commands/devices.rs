use std::path::Path;

use anyhow::{Context, Result};
use scanner_core::camera::{CameraBackend, StreamRequest};
use scanner_core::capability::probe_or_default;

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let (_config, camera) = super::load_rig(config_path)?;
    let devices = camera
        .video_inputs()
        .context("Failed to enumerate video inputs")?;

    if devices.is_empty() {
        println!("No video inputs configured");
        return Ok(());
    }

    println!(
        "{:<10}  {:<24}  {:<12}  {:<6}  {}",
        "ID", "Label", "Facing", "Torch", "Manual focus"
    );
    println!("{}", "-".repeat(68));

    for device in &devices {
        let facing = device
            .facing
            .map(|f| f.to_string())
            .unwrap_or_else(|| "-".into());
        // The stream is dropped (and stopped) at the end of each iteration.
        let (torch, manual) = match camera.open_stream(&StreamRequest::Device(device.id.clone())) {
            Ok(stream) => stream
                .video_track()
                .map(|t| {
                    let caps = t.capabilities();
                    (yes_no(caps.torch), yes_no(caps.supports_manual_focus()))
                })
                .unwrap_or(("-", "-")),
            Err(e) => {
                tracing::warn!(device = %device.id, error = %e, "could not open device");
                ("?", "?")
            }
        };
        println!(
            "{:<10}  {:<24}  {:<12}  {:<6}  {}",
            device.id, device.label, facing, torch, manual
        );
    }

    let session_caps = probe_or_default(&camera);
    println!(
        "\nTorch control: {}",
        if session_caps.has_torch {
            "available"
        } else {
            "unavailable"
        }
    );

    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

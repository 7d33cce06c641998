use tracing::{debug, warn};

use crate::camera::{CameraBackend, StreamRequest};
use crate::error::{Result, ScanError};
use crate::model::DeviceCapabilities;

/// Open a short-lived stream on the first video input and read its torch
/// support. The probe stream is released before returning.
pub fn probe_capabilities(camera: &dyn CameraBackend) -> Result<DeviceCapabilities> {
    let cameras = camera
        .video_inputs()
        .map_err(|e| ScanError::CapabilityProbe(e.to_string()))?;
    let Some(first) = cameras.first() else {
        return Ok(DeviceCapabilities::default());
    };

    let mut stream = camera
        .open_stream(&StreamRequest::Device(first.id.clone()))
        .map_err(|e| ScanError::CapabilityProbe(e.to_string()))?;
    let capabilities = stream
        .video_track()
        .map(|t| DeviceCapabilities {
            has_torch: t.capabilities().torch,
        })
        .unwrap_or_default();
    stream.stop_all();

    debug!(device = %first.label, torch = capabilities.has_torch, "capabilities probed");
    Ok(capabilities)
}

/// Like [`probe_capabilities`], but a failed probe degrades to "no torch".
pub fn probe_or_default(camera: &dyn CameraBackend) -> DeviceCapabilities {
    probe_capabilities(camera).unwrap_or_else(|e| {
        warn!(error = %e, "failed to check torch capability");
        DeviceCapabilities::default()
    })
}

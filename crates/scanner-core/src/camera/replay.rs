use std::path::{Path, PathBuf};

use image::GrayImage;
use tracing::{debug, info};

use crate::config::{CameraRigConfig, ReplayDeviceConfig, RigPermission};
use crate::consts::FRAME_EXTENSIONS;
use crate::error::{Result, ScanError};
use crate::model::ControlMode;

use super::{
    CameraBackend, DeviceKind, MediaDevice, MediaStream, StreamRequest, TrackCapabilities,
    TrackConstraint, VideoTrack,
};

/// Camera backend that replays image files as video frames.
pub struct ReplayCamera {
    permission: RigPermission,
    devices: Vec<ReplayDeviceConfig>,
}

impl ReplayCamera {
    /// Build from a rig config. Relative frame paths resolve against `base_dir`.
    pub fn from_config(rig: &CameraRigConfig, base_dir: Option<&Path>) -> Self {
        let devices = rig
            .devices
            .iter()
            .map(|d| {
                let mut d = d.clone();
                if let Some(base) = base_dir {
                    if d.frames.is_relative() {
                        d.frames = base.join(&d.frames);
                    }
                }
                d
            })
            .collect();
        Self {
            permission: rig.permission,
            devices,
        }
    }

    fn device_id(index: usize) -> String {
        format!("replay-{index}")
    }

    fn select(&self, request: &StreamRequest) -> Result<(usize, &ReplayDeviceConfig)> {
        if self.permission == RigPermission::Denied {
            return Err(ScanError::PermissionDenied(
                "camera access was denied".into(),
            ));
        }
        if self.devices.is_empty() {
            return Err(ScanError::NoCamera);
        }

        let found = match request {
            StreamRequest::AnyVideo => Some(0),
            StreamRequest::Device(id) => {
                (0..self.devices.len()).find(|&i| Self::device_id(i) == *id)
            }
            // facingMode is a preference: fall back to the first camera.
            StreamRequest::Constraints(c) => Some(
                self.devices
                    .iter()
                    .position(|d| d.facing == c.facing_mode)
                    .unwrap_or(0),
            ),
        };

        found
            .map(|i| (i, &self.devices[i]))
            .ok_or(ScanError::NoCamera)
    }
}

impl CameraBackend for ReplayCamera {
    fn enumerate_devices(&self) -> Result<Vec<MediaDevice>> {
        Ok(self
            .devices
            .iter()
            .enumerate()
            .map(|(i, d)| MediaDevice {
                id: Self::device_id(i),
                label: d.label.clone(),
                kind: DeviceKind::VideoInput,
                facing: Some(d.facing),
            })
            .collect())
    }

    fn open_stream(&self, request: &StreamRequest) -> Result<MediaStream> {
        let (index, device) = self.select(request)?;
        let frames = frame_paths(&device.frames)?;
        info!(
            device = %device.label,
            id = %Self::device_id(index),
            frames = frames.len(),
            "replay stream opened"
        );
        Ok(MediaStream::new(vec![Box::new(ReplayTrack::new(
            device, frames,
        ))]))
    }
}

/// Frame image files under `source` (a directory or a single file), in name order.
///
/// Only the file listing happens here; frames are decoded one at a time as
/// the track is read.
pub fn frame_paths(source: &Path) -> Result<Vec<PathBuf>> {
    if !source.is_dir() {
        if !source.is_file() {
            return Err(ScanError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no frames at {}", source.display()),
            )));
        }
        return Ok(vec![source.to_path_buf()]);
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(source)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && has_frame_extension(p))
        .collect();
    paths.sort();
    Ok(paths)
}

fn has_frame_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| FRAME_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Replayed track: loops over its frame files until stopped.
pub struct ReplayTrack {
    label: String,
    frames: Vec<PathBuf>,
    cursor: usize,
    live: bool,
    torch_supported: bool,
    manual_focus_supported: bool,
    torch_on: bool,
    focus_mode: ControlMode,
}

impl ReplayTrack {
    fn new(device: &ReplayDeviceConfig, frames: Vec<PathBuf>) -> Self {
        Self {
            label: device.label.clone(),
            frames,
            cursor: 0,
            live: true,
            torch_supported: device.torch,
            manual_focus_supported: device.manual_focus,
            torch_on: false,
            focus_mode: ControlMode::Continuous,
        }
    }

    pub fn torch_on(&self) -> bool {
        self.torch_on
    }

    pub fn focus_mode(&self) -> ControlMode {
        self.focus_mode
    }
}

impl VideoTrack for ReplayTrack {
    fn label(&self) -> &str {
        &self.label
    }

    fn capabilities(&self) -> TrackCapabilities {
        let mut focus_modes = vec![ControlMode::Continuous];
        if self.manual_focus_supported {
            focus_modes.push(ControlMode::Manual);
        }
        TrackCapabilities {
            torch: self.torch_supported,
            focus_modes,
        }
    }

    fn apply(&mut self, constraint: &TrackConstraint) -> Result<()> {
        if !self.live {
            return Err(ScanError::StreamClosed);
        }
        match constraint {
            TrackConstraint::Torch(on) => {
                if !self.torch_supported {
                    return Err(ScanError::ConstraintApply(format!(
                        "{} has no torch",
                        self.label
                    )));
                }
                self.torch_on = *on;
            }
            TrackConstraint::ManualFocus { .. } => {
                if !self.manual_focus_supported {
                    return Err(ScanError::ConstraintApply(format!(
                        "{} does not support manual focus",
                        self.label
                    )));
                }
                self.focus_mode = ControlMode::Manual;
            }
            TrackConstraint::ContinuousFocus => self.focus_mode = ControlMode::Continuous,
        }
        debug!(track = %self.label, %constraint, "constraint applied");
        Ok(())
    }

    fn grab_frame(&mut self) -> Result<Option<GrayImage>> {
        if !self.live {
            return Err(ScanError::StreamClosed);
        }
        if self.frames.is_empty() {
            return Ok(None);
        }
        let path = &self.frames[self.cursor % self.frames.len()];
        self.cursor = self.cursor.wrapping_add(1);
        Ok(Some(image::open(path)?.to_luma8()))
    }

    fn stop(&mut self) {
        if self.live {
            self.live = false;
            self.torch_on = false;
            debug!(track = %self.label, "track stopped");
        }
    }

    fn is_live(&self) -> bool {
        self.live
    }
}

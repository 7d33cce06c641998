use std::path::Path;
use std::sync::mpsc;

use anyhow::{Context, Result};

use scanner_core::camera::CameraBackend;
use scanner_core::config::ScannerConfig;
use scanner_core::permission::{probe_camera, PermissionState};

use crate::messages::WorkerResult;

use super::{send, send_error, send_log};

pub(super) fn handle_probe_camera(
    camera: &dyn CameraBackend,
    generation: u64,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let state = probe_camera(camera);
    if state == PermissionState::Denied {
        send_log(tx, ctx, "Camera access denied");
    }
    send(tx, ctx, WorkerResult::Permission { state, generation });
}

pub(super) fn handle_list_devices(
    camera: &dyn CameraBackend,
    generation: u64,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match camera.video_inputs() {
        Ok(devices) => send(
            tx,
            ctx,
            WorkerResult::Devices {
                devices,
                generation,
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Failed to list cameras: {e}")),
    }
}

pub(super) fn handle_load_config(
    path: &Path,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match read_config(path) {
        Ok(config) => send(
            tx,
            ctx,
            WorkerResult::ConfigLoaded {
                config,
                path: path.to_path_buf(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("{e:#}")),
    }
}

fn read_config(path: &Path) -> Result<ScannerConfig> {
    ScannerConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

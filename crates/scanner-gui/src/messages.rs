use std::path::PathBuf;
use std::sync::Arc;

use scanner_core::camera::{CameraBackend, MediaDevice};
use scanner_core::config::ScannerConfig;
use scanner_core::permission::PermissionState;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Camera availability check run on startup.
    ProbeCamera {
        camera: Arc<dyn CameraBackend>,
        generation: u64,
    },

    /// Enumerate video inputs for the landing screen.
    ListDevices {
        camera: Arc<dyn CameraBackend>,
        generation: u64,
    },

    /// Read a scanner config from disk.
    LoadConfig { path: PathBuf },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    Permission {
        state: PermissionState,
        generation: u64,
    },
    Devices {
        devices: Vec<MediaDevice>,
        generation: u64,
    },
    ConfigLoaded {
        config: ScannerConfig,
        path: PathBuf,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}

use tracing::{info, warn};

use crate::camera::{CameraBackend, StreamRequest};

/// Outcome of the camera availability check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PermissionState {
    /// Probe not run yet, or still in flight.
    #[default]
    Unknown,
    Granted,
    Denied,
}

impl std::fmt::Display for PermissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Granted => write!(f, "granted"),
            Self::Denied => write!(f, "denied"),
        }
    }
}

/// Open a video-only stream and release it straight away.
///
/// Any failure (rejection, missing device, unsupported backend) counts as a
/// denial.
pub fn probe_camera(camera: &dyn CameraBackend) -> PermissionState {
    match camera.open_stream(&StreamRequest::AnyVideo) {
        Ok(mut stream) => {
            stream.stop_all();
            info!("camera access granted");
            PermissionState::Granted
        }
        Err(e) => {
            warn!(error = %e, "camera permission check failed");
            PermissionState::Denied
        }
    }
}

/// Gates the scan screen on a single camera availability check.
#[derive(Debug, Default)]
pub struct PermissionGate {
    state: PermissionState,
}

impl PermissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PermissionState {
        self.state
    }

    /// Run the probe once. Later calls return the recorded state without
    /// touching the camera again.
    pub fn check_camera_availability(&mut self, camera: &dyn CameraBackend) -> PermissionState {
        if self.state == PermissionState::Unknown {
            self.state = probe_camera(camera);
        }
        self.state
    }

    /// Record the outcome of a probe run elsewhere (e.g. on a worker thread).
    /// Only the first resolution is kept.
    pub fn resolve(&mut self, state: PermissionState) -> PermissionState {
        if self.state == PermissionState::Unknown {
            self.state = state;
        }
        self.state
    }

    pub fn allows_scanning(&self) -> bool {
        self.state == PermissionState::Granted
    }
}

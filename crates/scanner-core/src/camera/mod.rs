pub mod replay;

use image::GrayImage;

use crate::error::Result;
use crate::model::{CameraConstraints, ControlMode, FacingMode};

pub use replay::ReplayCamera;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceKind {
    VideoInput,
    AudioInput,
}

/// One entry from device enumeration.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaDevice {
    pub id: String,
    pub label: String,
    pub kind: DeviceKind,
    pub facing: Option<FacingMode>,
}

/// What to open a stream on.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamRequest {
    /// Any video input; used for permission checks.
    AnyVideo,
    /// A specific device from enumeration.
    Device(String),
    /// Best match for the scan constraints.
    Constraints(CameraConstraints),
}

/// Feature set reported by a live track.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackCapabilities {
    pub torch: bool,
    pub focus_modes: Vec<ControlMode>,
}

impl TrackCapabilities {
    pub fn supports_manual_focus(&self) -> bool {
        self.focus_modes.contains(&ControlMode::Manual)
    }
}

/// A single constraint applied to a running track.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackConstraint {
    Torch(bool),
    /// One-shot focus at a normalized point of interest.
    ManualFocus { distance: f32, point: (f32, f32) },
    ContinuousFocus,
}

impl std::fmt::Display for TrackConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Torch(on) => write!(f, "torch={on}"),
            Self::ManualFocus { distance, point } => write!(
                f,
                "manual focus (distance={distance}, point=({:.2}, {:.2}))",
                point.0, point.1
            ),
            Self::ContinuousFocus => write!(f, "continuous focus"),
        }
    }
}

/// A live video track.
pub trait VideoTrack: Send {
    fn label(&self) -> &str;
    fn capabilities(&self) -> TrackCapabilities;
    fn apply(&mut self, constraint: &TrackConstraint) -> Result<()>;
    /// Next frame, or `None` when the track has nothing new yet.
    fn grab_frame(&mut self) -> Result<Option<GrayImage>>;
    fn stop(&mut self);
    fn is_live(&self) -> bool;
}

/// Camera access: enumeration plus stream acquisition.
pub trait CameraBackend: Send + Sync {
    fn enumerate_devices(&self) -> Result<Vec<MediaDevice>>;
    fn open_stream(&self, request: &StreamRequest) -> Result<MediaStream>;

    fn video_inputs(&self) -> Result<Vec<MediaDevice>> {
        Ok(self
            .enumerate_devices()?
            .into_iter()
            .filter(|d| d.kind == DeviceKind::VideoInput)
            .collect())
    }
}

/// Tracks handed out by one stream request. Dropping the stream stops them.
pub struct MediaStream {
    tracks: Vec<Box<dyn VideoTrack>>,
}

impl MediaStream {
    pub fn new(tracks: Vec<Box<dyn VideoTrack>>) -> Self {
        Self { tracks }
    }

    pub fn video_track(&self) -> Option<&dyn VideoTrack> {
        self.tracks.first().map(|t| t.as_ref())
    }

    pub fn video_track_mut(&mut self) -> Option<&mut (dyn VideoTrack + 'static)> {
        self.tracks.first_mut().map(|t| t.as_mut())
    }

    pub fn is_live(&self) -> bool {
        self.tracks.iter().any(|t| t.is_live())
    }

    pub fn stop_all(&mut self) {
        for track in &mut self.tracks {
            if track.is_live() {
                track.stop();
            }
        }
    }
}

impl Drop for MediaStream {
    fn drop(&mut self) {
        self.stop_all();
    }
}

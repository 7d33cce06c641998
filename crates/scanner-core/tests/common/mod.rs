use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use image::{GrayImage, Luma};

use scanner_core::camera::{
    CameraBackend, DeviceKind, MediaDevice, MediaStream, StreamRequest, TrackCapabilities,
    TrackConstraint, VideoTrack,
};
use scanner_core::config::ScannerConfig;
use scanner_core::decode::{Decoded, DecoderFactory, FrameDecoder};
use scanner_core::effects::{EffectHost, ScreenEffect};
use scanner_core::error::{Result, ScanError};
use scanner_core::feedback::Haptics;
use scanner_core::model::{ControlMode, FacingMode};
use scanner_core::platform::{PlatformFamily, PlatformProfile};
use scanner_core::presenter::ClipboardWriter;
use scanner_core::session::{SessionController, SessionDeps};

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct FakeDevice {
    pub label: &'static str,
    pub facing: FacingMode,
    pub torch: bool,
    pub manual_focus: bool,
    /// Advertises manual focus but refuses to apply it.
    pub rejects_focus: bool,
}

/// Rear camera with torch and manual focus, front camera with neither.
pub fn rear_and_front() -> Vec<FakeDevice> {
    vec![
        FakeDevice {
            label: "Back Camera",
            facing: FacingMode::Environment,
            torch: true,
            manual_focus: true,
            rejects_focus: false,
        },
        FakeDevice {
            label: "Front Camera",
            facing: FacingMode::User,
            torch: false,
            manual_focus: false,
            rejects_focus: false,
        },
    ]
}

/// A single rear camera without torch or manual focus.
pub fn plain_camera() -> Vec<FakeDevice> {
    vec![FakeDevice {
        label: "Webcam",
        facing: FacingMode::Environment,
        torch: false,
        manual_focus: false,
        rejects_focus: false,
    }]
}

/// A rear camera whose driver lists manual focus but rejects every request.
pub fn stubborn_focus_camera() -> Vec<FakeDevice> {
    vec![FakeDevice {
        label: "Back Camera",
        facing: FacingMode::Environment,
        torch: false,
        manual_focus: true,
        rejects_focus: true,
    }]
}

/// Observable state of one opened track.
pub struct TrackState {
    pub label: String,
    pub live: AtomicBool,
    pub torch_on: AtomicBool,
    pub grabs: AtomicUsize,
    pub applied: Mutex<Vec<TrackConstraint>>,
}

impl TrackState {
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    pub fn applied(&self) -> Vec<TrackConstraint> {
        self.applied.lock().unwrap().clone()
    }
}

pub struct OpenRecord {
    pub request: StreamRequest,
    pub state: Arc<TrackState>,
}

pub struct FakeCamera {
    devices: Vec<FakeDevice>,
    deny: bool,
    fail_enumerate: bool,
    unavailable: AtomicBool,
    enumerations: AtomicUsize,
    opens: Mutex<Vec<OpenRecord>>,
}

impl FakeCamera {
    pub fn new(devices: Vec<FakeDevice>) -> Self {
        Self {
            devices,
            deny: false,
            fail_enumerate: false,
            unavailable: AtomicBool::new(false),
            enumerations: AtomicUsize::new(0),
            opens: Mutex::new(Vec::new()),
        }
    }

    pub fn denied() -> Self {
        Self {
            deny: true,
            ..Self::new(rear_and_front())
        }
    }

    pub fn with_failing_enumeration(mut self) -> Self {
        self.fail_enumerate = true;
        self
    }

    /// Make later stream requests fail as if the camera were unplugged.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn open_count(&self) -> usize {
        self.opens.lock().unwrap().len()
    }

    pub fn enumeration_count(&self) -> usize {
        self.enumerations.load(Ordering::SeqCst)
    }

    pub fn opens(&self) -> MutexGuard<'_, Vec<OpenRecord>> {
        self.opens.lock().unwrap()
    }

    pub fn last_track(&self) -> Arc<TrackState> {
        Arc::clone(&self.opens().last().expect("no stream opened").state)
    }

    pub fn live_tracks(&self) -> usize {
        self.opens().iter().filter(|o| o.state.is_live()).count()
    }

    fn device_id(index: usize) -> String {
        format!("fake-{index}")
    }
}

impl CameraBackend for FakeCamera {
    fn enumerate_devices(&self) -> Result<Vec<MediaDevice>> {
        self.enumerations.fetch_add(1, Ordering::SeqCst);
        if self.fail_enumerate {
            return Err(ScanError::CapabilityProbe("enumerateDevices rejected".into()));
        }
        Ok(self
            .devices
            .iter()
            .enumerate()
            .map(|(i, d)| MediaDevice {
                id: Self::device_id(i),
                label: d.label.to_string(),
                kind: DeviceKind::VideoInput,
                facing: Some(d.facing),
            })
            .collect())
    }

    fn open_stream(&self, request: &StreamRequest) -> Result<MediaStream> {
        if self.deny {
            return Err(ScanError::PermissionDenied("NotAllowedError".into()));
        }
        if self.devices.is_empty() || self.unavailable.load(Ordering::SeqCst) {
            return Err(ScanError::NoCamera);
        }
        let index = match request {
            StreamRequest::AnyVideo => 0,
            StreamRequest::Device(id) => (0..self.devices.len())
                .find(|&i| Self::device_id(i) == *id)
                .ok_or(ScanError::NoCamera)?,
            StreamRequest::Constraints(c) => self
                .devices
                .iter()
                .position(|d| d.facing == c.facing_mode)
                .unwrap_or(0),
        };
        let device = self.devices[index].clone();
        let state = Arc::new(TrackState {
            label: device.label.to_string(),
            live: AtomicBool::new(true),
            torch_on: AtomicBool::new(false),
            grabs: AtomicUsize::new(0),
            applied: Mutex::new(Vec::new()),
        });
        self.opens.lock().unwrap().push(OpenRecord {
            request: request.clone(),
            state: Arc::clone(&state),
        });
        Ok(MediaStream::new(vec![Box::new(FakeTrack { device, state })]))
    }
}

struct FakeTrack {
    device: FakeDevice,
    state: Arc<TrackState>,
}

impl VideoTrack for FakeTrack {
    fn label(&self) -> &str {
        self.device.label
    }

    fn capabilities(&self) -> TrackCapabilities {
        let mut focus_modes = vec![ControlMode::Continuous];
        if self.device.manual_focus {
            focus_modes.push(ControlMode::Manual);
        }
        TrackCapabilities {
            torch: self.device.torch,
            focus_modes,
        }
    }

    fn apply(&mut self, constraint: &TrackConstraint) -> Result<()> {
        if !self.state.is_live() {
            return Err(ScanError::StreamClosed);
        }
        match constraint {
            TrackConstraint::Torch(on) => {
                if !self.device.torch {
                    return Err(ScanError::ConstraintApply("torch".into()));
                }
                self.state.torch_on.store(*on, Ordering::SeqCst);
            }
            TrackConstraint::ManualFocus { .. } if self.device.rejects_focus => {
                return Err(ScanError::ConstraintApply("OverconstrainedError".into()));
            }
            _ => {}
        }
        self.state.applied.lock().unwrap().push(constraint.clone());
        Ok(())
    }

    fn grab_frame(&mut self) -> Result<Option<GrayImage>> {
        if !self.state.is_live() {
            return Err(ScanError::StreamClosed);
        }
        self.state.grabs.fetch_add(1, Ordering::SeqCst);
        Ok(Some(GrayImage::from_pixel(8, 6, Luma([128]))))
    }

    fn stop(&mut self) {
        self.state.live.store(false, Ordering::SeqCst);
    }

    fn is_live(&self) -> bool {
        self.state.is_live()
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub enum Step {
    Nothing,
    Decode(&'static str, &'static str),
    Fail(&'static str),
}

/// Plays back a fixed script, one step per frame, then finds nothing.
pub struct ScriptedDecoder {
    steps: VecDeque<Step>,
}

impl FrameDecoder for ScriptedDecoder {
    fn decode(&mut self, _frame: &GrayImage) -> Result<Option<Decoded>> {
        match self.steps.pop_front().unwrap_or(Step::Nothing) {
            Step::Nothing => Ok(None),
            Step::Decode(text, format) => Ok(Some(Decoded::new(text, format))),
            Step::Fail(msg) => Err(ScanError::Decode(msg.into())),
        }
    }
}

pub fn scripted_factory(steps: Vec<Step>) -> Arc<dyn DecoderFactory> {
    Arc::new(move || {
        Box::new(ScriptedDecoder {
            steps: steps.clone().into(),
        }) as Box<dyn FrameDecoder>
    })
}

pub fn silent_factory() -> Arc<dyn DecoderFactory> {
    scripted_factory(Vec::new())
}

// ---------------------------------------------------------------------------
// Haptics, clipboard, screen effects
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct RecordingHaptics {
    pub pulses: Arc<Mutex<Vec<Duration>>>,
}

impl Haptics for RecordingHaptics {
    fn vibrate(&self, pulse: Duration) {
        self.pulses.lock().unwrap().push(pulse);
    }
}

#[derive(Clone, Default)]
pub struct MemoryClipboard {
    pub written: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

impl MemoryClipboard {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }
}

impl ClipboardWriter for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.fail {
            return Err(ScanError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "clipboard write blocked",
            )));
        }
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingHost {
    pub log: Arc<Mutex<Vec<String>>>,
    pub refuse: Option<ScreenEffect>,
}

impl RecordingHost {
    pub fn entries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl EffectHost for RecordingHost {
    fn apply(&mut self, effect: ScreenEffect) -> Result<()> {
        if self.refuse == Some(effect) {
            return Err(ScanError::ConstraintApply(format!("{effect} unsupported")));
        }
        self.log.lock().unwrap().push(format!("apply {effect}"));
        Ok(())
    }

    fn revert(&mut self, effect: ScreenEffect) {
        self.log.lock().unwrap().push(format!("revert {effect}"));
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub fn fast_config() -> ScannerConfig {
    let mut config = ScannerConfig::default();
    config.timing.decode_interval_ms = 2;
    config
}

pub fn build_session(
    camera: &Arc<FakeCamera>,
    decoders: Arc<dyn DecoderFactory>,
    haptics: RecordingHaptics,
) -> SessionController {
    build_session_for(camera, decoders, haptics, PlatformFamily::Desktop)
}

pub fn build_session_for(
    camera: &Arc<FakeCamera>,
    decoders: Arc<dyn DecoderFactory>,
    haptics: RecordingHaptics,
    family: PlatformFamily,
) -> SessionController {
    let config = fast_config();
    let profile = PlatformProfile::resolve(family, &config);
    let camera: Arc<dyn CameraBackend> = camera.clone();
    SessionController::new(
        &config,
        profile,
        SessionDeps {
            camera,
            decoders,
            haptics: Box::new(haptics),
        },
    )
}

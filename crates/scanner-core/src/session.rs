//! Scan session controller.
//!
//! Drives the `initializing -> scanning -> result_shown` lifecycle of the
//! scan screen. The controller is owned by a single thread and advanced with
//! [`SessionController::tick`]; decoding happens on the subscription's
//! worker thread and reaches the controller as [`DecodeEvent`]s.

use std::sync::Arc;
use std::time::{Duration, Instant};

use image::GrayImage;
use tracing::{debug, info, warn};

use crate::camera::{CameraBackend, TrackConstraint};
use crate::capability;
use crate::config::{FeedbackConfig, FocusConfig, ScannerConfig, TimingConfig};
use crate::decode::{DecodeEvent, DecodeSubscription, Decoded, DecoderFactory};
use crate::feedback::Haptics;
use crate::model::{CameraConstraints, DeviceCapabilities, FacingMode, ScanResult, ScannerError};
use crate::platform::PlatformProfile;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Created but not started.
    Idle,
    /// Waiting for the camera to warm up.
    Initializing { ready_at: Instant },
    Scanning,
    ResultShown,
    /// Torn down; the camera has been released.
    Closed,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Initializing { .. } => write!(f, "initializing"),
            Self::Scanning => write!(f, "scanning"),
            Self::ResultShown => write!(f, "result_shown"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// External collaborators of a session.
pub struct SessionDeps {
    pub camera: Arc<dyn CameraBackend>,
    pub decoders: Arc<dyn DecoderFactory>,
    pub haptics: Box<dyn Haptics>,
}

pub struct SessionController {
    camera: Arc<dyn CameraBackend>,
    decoders: Arc<dyn DecoderFactory>,
    haptics: Box<dyn Haptics>,
    profile: PlatformProfile,
    timing: TimingConfig,
    focus: FocusConfig,
    feedback: FeedbackConfig,

    phase: SessionPhase,
    constraints: CameraConstraints,
    capabilities: Option<DeviceCapabilities>,
    torch_on: bool,
    result: Option<ScanResult>,
    error: Option<ScannerError>,
    subscription: Option<DecodeSubscription>,
    /// The error banner comes from a failed stream open.
    stream_failed: bool,
    focus_revert_at: Option<Instant>,
}

impl SessionController {
    pub fn new(config: &ScannerConfig, profile: PlatformProfile, deps: SessionDeps) -> Self {
        Self {
            camera: deps.camera,
            decoders: deps.decoders,
            haptics: deps.haptics,
            profile,
            timing: config.timing.clone(),
            focus: config.focus.clone(),
            feedback: config.feedback.clone(),
            phase: SessionPhase::Idle,
            constraints: CameraConstraints::from_profile(&config.constraints),
            capabilities: None,
            torch_on: false,
            result: None,
            error: None,
            subscription: None,
            stream_failed: false,
            focus_revert_at: None,
        }
    }

    /// Begin the camera warm-up.
    pub fn start(&mut self, now: Instant) {
        if self.phase != SessionPhase::Idle {
            return;
        }
        let ready_at = now + self.profile.warmup;
        debug!(warmup_ms = self.profile.warmup.as_millis() as u64, "session initializing");
        self.phase = SessionPhase::Initializing { ready_at };
    }

    /// Advance timers and relay pending decoder events.
    pub fn tick(&mut self, now: Instant) {
        if let SessionPhase::Initializing { ready_at } = self.phase {
            if now >= ready_at {
                self.enter_scanning();
            }
        }

        if self.phase == SessionPhase::Scanning {
            self.drain_events();
        }

        if let Some(at) = self.focus_revert_at {
            if now >= at {
                self.focus_revert_at = None;
                self.revert_focus();
            }
        }
    }

    fn enter_scanning(&mut self) {
        if self.capabilities.is_none() {
            self.capabilities = Some(capability::probe_or_default(self.camera.as_ref()));
        }
        self.phase = SessionPhase::Scanning;
        info!(facing = %self.constraints.facing_mode, "scanning");
        self.open_stream();
    }

    /// (Re)acquire the decode stream under the current constraints.
    fn open_stream(&mut self) {
        self.release_stream();
        match DecodeSubscription::start(
            self.camera.as_ref(),
            &self.constraints,
            self.decoders.create(),
            self.timing.decode_interval(),
        ) {
            Ok(subscription) => {
                self.subscription = Some(subscription);
                if std::mem::take(&mut self.stream_failed) {
                    self.error = None;
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to start decode stream");
                self.error = Some(ScannerError::new(e.to_string()));
                self.stream_failed = true;
            }
        }
    }

    fn release_stream(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.cancel();
        }
        self.focus_revert_at = None;
        self.torch_on = false;
    }

    fn drain_events(&mut self) {
        let events = match &self.subscription {
            Some(subscription) => subscription.try_events(),
            None => return,
        };
        for event in events {
            match event {
                DecodeEvent::Decoded(decoded) => {
                    self.on_decode(decoded);
                    break;
                }
                DecodeEvent::Error(message) => self.on_error(message),
            }
        }
    }

    /// Decoder reported a symbol. Only the first decode of a scan counts.
    pub fn on_decode(&mut self, decoded: Decoded) -> bool {
        if self.phase != SessionPhase::Scanning {
            return false;
        }
        let result = ScanResult::from_decoded(decoded);
        info!(format = result.format(), "barcode decoded");
        if self.feedback.haptics {
            self.haptics.vibrate(self.feedback.haptic_pulse());
        }
        self.result = Some(result);
        self.phase = SessionPhase::ResultShown;
        self.release_stream();
        true
    }

    /// Decoder reported a transient error; scanning carries on.
    pub fn on_error(&mut self, message: impl Into<String>) {
        if self.phase != SessionPhase::Scanning {
            return;
        }
        let error = ScannerError::new(message);
        warn!(error = %error, "scanner error");
        self.error = Some(error);
    }

    /// Leave the result screen and scan again.
    pub fn scan_again(&mut self) -> bool {
        if self.phase != SessionPhase::ResultShown {
            return false;
        }
        self.result = None;
        self.error = None;
        self.stream_failed = false;
        self.phase = SessionPhase::Scanning;
        self.open_stream();
        true
    }

    /// Flip between the rear and front camera. A live stream is restarted
    /// under the new constraints.
    pub fn switch_camera(&mut self) -> FacingMode {
        if self.phase == SessionPhase::Closed {
            return self.constraints.facing_mode;
        }
        self.constraints = self.constraints.switched();
        debug!(facing = %self.constraints.facing_mode, "camera switched");
        if self.phase == SessionPhase::Scanning {
            self.open_stream();
        }
        self.constraints.facing_mode
    }

    /// Toggle the torch. Does nothing unless the device has one and a
    /// stream is live.
    pub fn toggle_torch(&mut self) -> bool {
        if !self.torch_available() || self.phase != SessionPhase::Scanning {
            return false;
        }
        let Some(subscription) = &self.subscription else {
            return false;
        };
        let on = !self.torch_on;
        if let Err(e) = subscription.set_torch(on) {
            warn!(error = %e, "torch constraint rejected");
        }
        self.torch_on = on;
        true
    }

    /// Tap-to-focus at a normalized point of the live view.
    ///
    /// Returns whether manual focus was applied. Tracks without manual focus
    /// and rejected constraints are ignored.
    pub fn focus_at(&mut self, x: f32, y: f32, now: Instant) -> bool {
        if self.phase != SessionPhase::Scanning {
            return false;
        }
        let Some(subscription) = &self.subscription else {
            return false;
        };
        let manual = subscription
            .track_capabilities()
            .map(|c| c.supports_manual_focus())
            .unwrap_or(false);
        if !manual {
            return false;
        }

        let point = (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0));
        let constraint = TrackConstraint::ManualFocus {
            distance: self.profile.focus_distance,
            point,
        };
        match subscription.apply_constraint(&constraint) {
            Ok(()) => {
                self.focus_revert_at = Some(now + self.focus.revert_delay());
                true
            }
            Err(e) => {
                debug!(error = %e, "manual focus error");
                false
            }
        }
    }

    fn revert_focus(&mut self) {
        if let Some(subscription) = &self.subscription {
            if let Err(e) = subscription.apply_constraint(&TrackConstraint::ContinuousFocus) {
                debug!(error = %e, "return to auto focus error");
            }
        }
    }

    /// Release the camera and cancel pending timers. Idempotent.
    pub fn teardown(&mut self) {
        if self.phase == SessionPhase::Closed {
            return;
        }
        self.release_stream();
        self.phase = SessionPhase::Closed;
        debug!("session torn down");
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn result(&self) -> Option<&ScanResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&ScannerError> {
        self.error.as_ref()
    }

    pub fn constraints(&self) -> &CameraConstraints {
        &self.constraints
    }

    pub fn capabilities(&self) -> Option<DeviceCapabilities> {
        self.capabilities
    }

    pub fn torch_available(&self) -> bool {
        self.capabilities.map(|c| c.has_torch).unwrap_or(false)
    }

    pub fn torch_enabled(&self) -> bool {
        self.torch_on
    }

    pub fn profile(&self) -> &PlatformProfile {
        &self.profile
    }

    pub fn is_streaming(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn pending_focus_revert(&self) -> Option<Instant> {
        self.focus_revert_at
    }

    /// Time left before the warm-up ends, if still initializing.
    pub fn warmup_remaining(&self, now: Instant) -> Option<Duration> {
        match self.phase {
            SessionPhase::Initializing { ready_at } => Some(ready_at.saturating_duration_since(now)),
            _ => None,
        }
    }

    pub fn latest_frame(&self) -> Option<GrayImage> {
        self.subscription.as_ref().and_then(|s| s.latest_frame())
    }

    /// Latest preview frame and its id, if newer than `seen`.
    pub fn latest_frame_since(&self, seen: u64) -> Option<(u64, GrayImage)> {
        self.subscription
            .as_ref()
            .and_then(|s| s.latest_frame_since(seen))
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.teardown();
    }
}

use std::sync::Arc;
use std::time::Instant;

use scanner_core::camera::CameraBackend;
use scanner_core::config::ScannerConfig;
use scanner_core::decode::qr_decoder_factory;
use scanner_core::effects::{EffectScope, ScreenEffect};
use scanner_core::feedback::LogHaptics;
use scanner_core::platform::PlatformProfile;
use scanner_core::session::{SessionController, SessionDeps};

use crate::host::EguiEffects;

/// Everything the scan screen holds while mounted.
///
/// Field order matters: the session (and its camera stream) is released
/// before the screen effects are reverted.
pub struct ScanScreen {
    pub session: SessionController,
    effects: EffectScope<EguiEffects>,
}

impl ScanScreen {
    pub fn open(
        ctx: &egui::Context,
        config: &ScannerConfig,
        camera: Arc<dyn CameraBackend>,
        now: Instant,
    ) -> Self {
        let profile = PlatformProfile::native(config);
        let effects = EffectScope::acquire(EguiEffects::new(ctx), &profile.scan_effects);
        let mut session = SessionController::new(
            config,
            profile,
            SessionDeps {
                camera,
                decoders: Arc::new(qr_decoder_factory()),
                haptics: Box::new(LogHaptics),
            },
        );
        session.start(now);
        Self { session, effects }
    }

    /// Whether drags over the live view should be swallowed.
    pub fn touch_guarded(&self) -> bool {
        self.effects.is_active(ScreenEffect::TouchGuard)
    }

    pub fn scroll_locked(&self) -> bool {
        self.effects.is_active(ScreenEffect::ScrollLock)
    }
}

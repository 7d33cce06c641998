use std::time::Duration;

use tracing::debug;

/// Fire-and-forget vibration.
pub trait Haptics: Send {
    fn vibrate(&self, pulse: Duration);
}

/// Host without a vibration motor.
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn vibrate(&self, _pulse: Duration) {}
}

/// Records the pulse in the log instead of vibrating.
pub struct LogHaptics;

impl Haptics for LogHaptics {
    fn vibrate(&self, pulse: Duration) {
        debug!(pulse_ms = pulse.as_millis() as u64, "haptic pulse");
    }
}

/// Ideal capture width requested from the camera, in pixels.
pub const DEFAULT_IDEAL_WIDTH: u32 = 1280;

/// Ideal capture height requested from the camera, in pixels.
pub const DEFAULT_IDEAL_HEIGHT: u32 = 720;

/// Camera warm-up delay before the scanner view goes live.
pub const DEFAULT_WARMUP_MS: u64 = 1500;

/// Warm-up delay on platforms with slow camera start (iOS).
pub const SLOW_PLATFORM_WARMUP_MS: u64 = 2500;

/// How long a tap-to-focus holds manual focus before reverting to continuous.
pub const FOCUS_REVERT_MS: u64 = 2000;

/// Manual focus distance applied on Android taps (normalized 0..1).
pub const ANDROID_FOCUS_DISTANCE: f32 = 0.3;

/// Manual focus distance applied on every other platform.
pub const DEFAULT_FOCUS_DISTANCE: f32 = 0.5;

/// Vibration pulse fired on a successful decode.
pub const HAPTIC_PULSE_MS: u64 = 100;

/// Pause between two decode attempts on the live stream.
pub const DECODE_INTERVAL_MS: u64 = 300;

/// Message shown after a successful copy.
pub const COPIED_MESSAGE: &str = "Copied to clipboard!";

/// Message shown when the decoder error carries no text of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to initialize scanner";

/// Image extensions picked up from a replay frames directory.
pub const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff"];

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    ANDROID_FOCUS_DISTANCE, DECODE_INTERVAL_MS, DEFAULT_FOCUS_DISTANCE, DEFAULT_IDEAL_HEIGHT,
    DEFAULT_IDEAL_WIDTH, DEFAULT_WARMUP_MS, FOCUS_REVERT_MS, HAPTIC_PULSE_MS,
    SLOW_PLATFORM_WARMUP_MS,
};
use crate::error::Result;
use crate::model::{ControlMode, FacingMode};

/// Top-level scanner configuration, loaded from TOML.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScannerConfig {
    #[serde(default)]
    pub constraints: ConstraintProfile,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub focus: FocusConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    #[serde(default)]
    pub camera: CameraRigConfig,
}

impl ScannerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Tunable camera constraints. Several revisions of the scanner shipped
/// different zoom/focus defaults, so all of them are exposed here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintProfile {
    pub facing_mode: FacingMode,
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub focus_mode: ControlMode,
    pub exposure_mode: ControlMode,
    pub white_balance_mode: ControlMode,
    pub zoom_hint: Option<f32>,
    pub focus_distance_hint: Option<f32>,
}

impl Default for ConstraintProfile {
    fn default() -> Self {
        Self {
            facing_mode: FacingMode::Environment,
            ideal_width: DEFAULT_IDEAL_WIDTH,
            ideal_height: DEFAULT_IDEAL_HEIGHT,
            focus_mode: ControlMode::Continuous,
            exposure_mode: ControlMode::Continuous,
            white_balance_mode: ControlMode::Continuous,
            zoom_hint: None,
            focus_distance_hint: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Camera warm-up before scanning starts.
    pub warmup_ms: u64,
    /// Warm-up on platforms with slow camera start.
    pub slow_platform_warmup_ms: u64,
    /// Pause between decode attempts.
    pub decode_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            warmup_ms: DEFAULT_WARMUP_MS,
            slow_platform_warmup_ms: SLOW_PLATFORM_WARMUP_MS,
            decode_interval_ms: DECODE_INTERVAL_MS,
        }
    }
}

impl TimingConfig {
    pub fn decode_interval(&self) -> Duration {
        Duration::from_millis(self.decode_interval_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// How long a tap holds manual focus.
    pub revert_ms: u64,
    pub android_distance: f32,
    pub default_distance: f32,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            revert_ms: FOCUS_REVERT_MS,
            android_distance: ANDROID_FOCUS_DISTANCE,
            default_distance: DEFAULT_FOCUS_DISTANCE,
        }
    }
}

impl FocusConfig {
    pub fn revert_delay(&self) -> Duration {
        Duration::from_millis(self.revert_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub haptics: bool,
    pub haptic_pulse_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            haptics: true,
            haptic_pulse_ms: HAPTIC_PULSE_MS,
        }
    }
}

impl FeedbackConfig {
    pub fn haptic_pulse(&self) -> Duration {
        Duration::from_millis(self.haptic_pulse_ms)
    }
}

/// How the replay rig answers stream requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RigPermission {
    #[default]
    Granted,
    Denied,
}

impl std::fmt::Display for RigPermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Granted => write!(f, "granted"),
            Self::Denied => write!(f, "denied"),
        }
    }
}

/// Camera devices backed by image files on disk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRigConfig {
    pub permission: RigPermission,
    pub devices: Vec<ReplayDeviceConfig>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayDeviceConfig {
    pub label: String,
    #[serde(default)]
    pub facing: FacingMode,
    /// A directory of frames (sorted by name) or a single image file.
    pub frames: PathBuf,
    #[serde(default)]
    pub torch: bool,
    #[serde(default)]
    pub manual_focus: bool,
}

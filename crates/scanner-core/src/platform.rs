use std::time::Duration;

use crate::config::ScannerConfig;
use crate::effects::ScreenEffect;

/// Device family, detected once at session start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlatformFamily {
    Ios,
    Android,
    #[default]
    Desktop,
}

impl PlatformFamily {
    /// Classify a browser-style user agent string.
    pub fn from_user_agent(ua: &str) -> Self {
        if ["iPad", "iPhone", "iPod"].iter().any(|m| ua.contains(m)) {
            Self::Ios
        } else if ua.to_ascii_lowercase().contains("android") {
            Self::Android
        } else {
            Self::Desktop
        }
    }

    /// Family of the host this binary was built for.
    pub fn native() -> Self {
        match std::env::consts::OS {
            "ios" => Self::Ios,
            "android" => Self::Android,
            _ => Self::Desktop,
        }
    }

    /// Platforms whose camera takes noticeably longer to start.
    pub fn has_slow_camera_start(self) -> bool {
        self == Self::Ios
    }
}

impl std::fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ios => write!(f, "iOS"),
            Self::Android => write!(f, "Android"),
            Self::Desktop => write!(f, "Desktop"),
        }
    }
}

/// Platform-dependent tunables, resolved once and handed to the session.
#[derive(Clone, Debug, PartialEq)]
pub struct PlatformProfile {
    pub family: PlatformFamily,
    pub warmup: Duration,
    pub focus_distance: f32,
    pub scan_effects: Vec<ScreenEffect>,
}

impl PlatformProfile {
    pub fn resolve(family: PlatformFamily, config: &ScannerConfig) -> Self {
        let warmup_ms = if family.has_slow_camera_start() {
            config.timing.slow_platform_warmup_ms
        } else {
            config.timing.warmup_ms
        };
        let focus_distance = match family {
            PlatformFamily::Android => config.focus.android_distance,
            _ => config.focus.default_distance,
        };
        let scan_effects = match family {
            PlatformFamily::Ios => vec![
                ScreenEffect::LightMode,
                ScreenEffect::ScrollLock,
                ScreenEffect::WakeLock,
            ],
            PlatformFamily::Android => vec![ScreenEffect::LightMode, ScreenEffect::TouchGuard],
            PlatformFamily::Desktop => vec![ScreenEffect::LightMode],
        };

        Self {
            family,
            warmup: Duration::from_millis(warmup_ms),
            focus_distance,
            scan_effects,
        }
    }

    pub fn native(config: &ScannerConfig) -> Self {
        Self::resolve(PlatformFamily::native(), config)
    }

    /// Scanning hints shown under the live view.
    pub fn scanning_tips(&self) -> &'static [&'static str] {
        match self.family {
            PlatformFamily::Ios => &[
                "Make sure you allowed camera access",
                "Good lighting improves scanning",
                "Tap the screen to focus on barcodes",
                "Hold the camera steady",
            ],
            PlatformFamily::Android => &[
                "Hold steady 4-8 inches from barcode",
                "Tap directly on the barcode to focus",
                "Try in good lighting conditions",
                "Works with both QR and traditional barcodes",
            ],
            PlatformFamily::Desktop => &[],
        }
    }
}

impl Default for PlatformProfile {
    fn default() -> Self {
        Self::resolve(PlatformFamily::Desktop, &ScannerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_detection() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
        let pixel = "Mozilla/5.0 (Linux; Android 14; Pixel 8)";
        let mac = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0)";
        assert_eq!(PlatformFamily::from_user_agent(iphone), PlatformFamily::Ios);
        assert_eq!(PlatformFamily::from_user_agent(pixel), PlatformFamily::Android);
        assert_eq!(PlatformFamily::from_user_agent(mac), PlatformFamily::Desktop);
    }

    #[test]
    fn ios_warms_up_longer() {
        let config = ScannerConfig::default();
        let ios = PlatformProfile::resolve(PlatformFamily::Ios, &config);
        let android = PlatformProfile::resolve(PlatformFamily::Android, &config);
        assert_eq!(ios.warmup, Duration::from_millis(2500));
        assert_eq!(android.warmup, Duration::from_millis(1500));
        assert!((android.focus_distance - 0.3).abs() < f32::EPSILON);
        assert!((ios.focus_distance - 0.5).abs() < f32::EPSILON);
    }
}

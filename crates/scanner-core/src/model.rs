use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ConstraintProfile;
use crate::decode::Decoded;

/// Which physical camera a stream is sourced from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Rear camera.
    #[default]
    Environment,
    /// Front camera.
    User,
}

impl FacingMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Environment => Self::User,
            Self::User => Self::Environment,
        }
    }
}

impl std::fmt::Display for FacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Environment => write!(f, "environment"),
            Self::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for FacingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "environment" | "back" | "rear" => Ok(Self::Environment),
            "user" | "front" => Ok(Self::User),
            other => Err(format!("unknown facing mode: {other}")),
        }
    }
}

/// Focus, exposure and white-balance control modes, as exposed by camera tracks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlMode {
    None,
    Manual,
    SingleShot,
    #[default]
    Continuous,
}

impl std::fmt::Display for ControlMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Manual => write!(f, "manual"),
            Self::SingleShot => write!(f, "single-shot"),
            Self::Continuous => write!(f, "continuous"),
        }
    }
}

/// Constraints handed to the camera when the decode stream is opened.
///
/// Replaced wholesale on camera switch; the facing mode is always exactly one
/// of the two cameras.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraConstraints {
    pub facing_mode: FacingMode,
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub focus_mode: ControlMode,
    pub exposure_mode: ControlMode,
    pub white_balance_mode: ControlMode,
    pub zoom_hint: Option<f32>,
    pub focus_distance_hint: Option<f32>,
}

impl CameraConstraints {
    pub fn from_profile(profile: &ConstraintProfile) -> Self {
        Self {
            facing_mode: profile.facing_mode,
            ideal_width: profile.ideal_width,
            ideal_height: profile.ideal_height,
            focus_mode: profile.focus_mode,
            exposure_mode: profile.exposure_mode,
            white_balance_mode: profile.white_balance_mode,
            zoom_hint: profile.zoom_hint,
            focus_distance_hint: profile.focus_distance_hint,
        }
    }

    /// Same constraints, sourced from the other camera.
    pub fn switched(&self) -> Self {
        Self {
            facing_mode: self.facing_mode.toggled(),
            ..self.clone()
        }
    }
}

impl Default for CameraConstraints {
    fn default() -> Self {
        Self::from_profile(&ConstraintProfile::default())
    }
}

/// Hardware features of the active camera, probed once per session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeviceCapabilities {
    pub has_torch: bool,
}

/// Barcode encoding standard reported by the decoder.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symbology {
    QrCode,
    Code128,
    Code39,
    Ean13,
    Ean8,
    UpcA,
    UpcE,
    Itf,
    DataMatrix,
    Pdf417,
    Aztec,
    Other(String),
}

/// Symbologies advertised on the landing screen.
pub const SUPPORTED_SYMBOLOGIES: &[Symbology] = &[
    Symbology::QrCode,
    Symbology::Code128,
    Symbology::Ean13,
    Symbology::Ean8,
    Symbology::Code39,
    Symbology::UpcA,
    Symbology::UpcE,
    Symbology::Itf,
];

impl Symbology {
    /// Human-readable name ("Code 128", "EAN-13").
    pub fn label(&self) -> &str {
        match self {
            Self::QrCode => "QR Code",
            Self::Code128 => "Code 128",
            Self::Code39 => "Code 39",
            Self::Ean13 => "EAN-13",
            Self::Ean8 => "EAN-8",
            Self::UpcA => "UPC-A",
            Self::UpcE => "UPC-E",
            Self::Itf => "ITF",
            Self::DataMatrix => "Data Matrix",
            Self::Pdf417 => "PDF417",
            Self::Aztec => "Aztec",
            Self::Other(name) => name.as_str(),
        }
    }
}

impl std::fmt::Display for Symbology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QrCode => write!(f, "QR_CODE"),
            Self::Code128 => write!(f, "CODE_128"),
            Self::Code39 => write!(f, "CODE_39"),
            Self::Ean13 => write!(f, "EAN_13"),
            Self::Ean8 => write!(f, "EAN_8"),
            Self::UpcA => write!(f, "UPC_A"),
            Self::UpcE => write!(f, "UPC_E"),
            Self::Itf => write!(f, "ITF"),
            Self::DataMatrix => write!(f, "DATA_MATRIX"),
            Self::Pdf417 => write!(f, "PDF_417"),
            Self::Aztec => write!(f, "AZTEC"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

impl From<&str> for Symbology {
    fn from(name: &str) -> Self {
        let normalized: String = name
            .trim()
            .chars()
            .filter_map(|c| match c {
                '-' | ' ' | '_' => None,
                c => Some(c.to_ascii_uppercase()),
            })
            .collect();
        match normalized.as_str() {
            "QRCODE" | "QR" => Self::QrCode,
            "CODE128" => Self::Code128,
            "CODE39" => Self::Code39,
            "EAN13" => Self::Ean13,
            "EAN8" => Self::Ean8,
            "UPCA" => Self::UpcA,
            "UPCE" => Self::UpcE,
            "ITF" => Self::Itf,
            "DATAMATRIX" => Self::DataMatrix,
            "PDF417" => Self::Pdf417,
            "AZTEC" => Self::Aztec,
            _ => Self::Other(name.trim().to_string()),
        }
    }
}

/// A decoded payload, captured the moment the decoder reported success.
///
/// Fields are private: a result is only ever built from a [`Decoded`] event
/// and never edited afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    text: String,
    format: String,
    timestamp: String,
}

impl ScanResult {
    /// Build a result stamped with the current UTC time.
    pub fn from_decoded(decoded: Decoded) -> Self {
        Self::at(decoded, Utc::now())
    }

    /// Build a result stamped with `at`.
    pub fn at(decoded: Decoded, at: DateTime<Utc>) -> Self {
        Self {
            text: decoded.text,
            format: decoded.format.to_string(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Symbology name, e.g. `QR_CODE`.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// ISO-8601 UTC timestamp with millisecond precision.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Transient error banner shown over a running scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerError {
    pub message: String,
}

impl ScannerError {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self {
                message: crate::consts::FALLBACK_ERROR_MESSAGE.to_string(),
            }
        } else {
            Self { message }
        }
    }
}

impl std::fmt::Display for ScannerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

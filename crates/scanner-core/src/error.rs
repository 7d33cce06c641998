use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Camera permission denied: {0}")]
    PermissionDenied(String),

    #[error("No video input device available")]
    NoCamera,

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Capability probe failed: {0}")]
    CapabilityProbe(String),

    #[error("Constraint rejected by device: {0}")]
    ConstraintApply(String),

    #[error("Video stream closed")]
    StreamClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Config serialization error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;

//! Decoder port: the barcode decoder is an external collaborator that turns
//! frames into decode events.

pub mod qr;
mod subscription;

use std::path::Path;

use image::GrayImage;

use crate::error::Result;
use crate::model::Symbology;

pub use qr::QrDecoder;
pub use subscription::DecodeSubscription;

/// Successful decode of one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub format: Symbology,
}

impl Decoded {
    pub fn new(text: impl Into<String>, format: impl Into<Symbology>) -> Self {
        Self {
            text: text.into(),
            format: format.into(),
        }
    }
}

/// Event delivered by a running decode subscription.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodeEvent {
    Decoded(Decoded),
    Error(String),
}

/// Turns a single frame into at most one decoded payload.
///
/// `Ok(None)` means no symbol was found; `Err` means a symbol was found but
/// could not be read.
pub trait FrameDecoder: Send {
    fn decode(&mut self, frame: &GrayImage) -> Result<Option<Decoded>>;
}

/// Produces a fresh decoder for each decode stream.
pub trait DecoderFactory: Send + Sync {
    fn create(&self) -> Box<dyn FrameDecoder>;
}

impl<F> DecoderFactory for F
where
    F: Fn() -> Box<dyn FrameDecoder> + Send + Sync,
{
    fn create(&self) -> Box<dyn FrameDecoder> {
        self()
    }
}

/// Factory for the bundled QR decoder.
pub fn qr_decoder_factory() -> impl DecoderFactory {
    || Box::new(QrDecoder::new()) as Box<dyn FrameDecoder>
}

/// Decode a single image file.
pub fn decode_path(path: &Path, decoder: &mut dyn FrameDecoder) -> Result<Option<Decoded>> {
    let frame = image::open(path)?.to_luma8();
    decoder.decode(&frame)
}

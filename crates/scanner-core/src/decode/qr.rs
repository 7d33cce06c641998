use image::GrayImage;
use tracing::trace;

use crate::error::{Result, ScanError};
use crate::model::Symbology;

use super::{Decoded, FrameDecoder};

/// QR-only decoder backed by `rqrr`.
#[derive(Default)]
pub struct QrDecoder {
    frames_seen: u64,
}

impl QrDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }
}

impl FrameDecoder for QrDecoder {
    fn decode(&mut self, frame: &GrayImage) -> Result<Option<Decoded>> {
        self.frames_seen += 1;
        let (w, h) = frame.dimensions();
        if w == 0 || h == 0 {
            return Ok(None);
        }

        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(w as usize, h as usize, |x, y| {
                frame.get_pixel(x as u32, y as u32).0[0]
            });
        let grids = prepared.detect_grids();
        trace!(grids = grids.len(), frame = self.frames_seen, "qr grids detected");

        let mut last_error = None;
        for grid in grids {
            match grid.decode() {
                Ok((_meta, content)) => return Ok(Some(Decoded::new(content, Symbology::QrCode))),
                Err(e) => last_error = Some(e),
            }
        }

        match last_error {
            Some(e) => Err(ScanError::Decode(e.to_string())),
            None => Ok(None),
        }
    }
}

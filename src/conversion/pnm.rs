//! Netpbm (PBM/PGM/PPM/PAM) decoding.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader};

use super::BitmapDecoder;
use crate::error::{Error, Result};

/// Accepts every member of the portable anymap family, plain or raw.
///
/// The subtype is not checked against an expected one: bitmaps, graymaps,
/// pixmaps and PAM files are all promoted to 8-bit RGB, which is the only
/// pixel layout handed to encoders. No size or allocation limits apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct PnmBitmapDecoder;

impl BitmapDecoder for PnmBitmapDecoder {
    fn name(&self) -> &'static str {
        "pnm"
    }

    fn decode(&self, data: &[u8]) -> Result<DynamicImage> {
        let mut reader = ImageReader::with_format(Cursor::new(data), ImageFormat::Pnm);
        reader.no_limits();
        let image = reader.decode().map_err(|e| Error::Decode(e.to_string()))?;

        Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
    }
}

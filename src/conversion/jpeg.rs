//! JPEG output.

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use super::PhotoEncoder;
use crate::error::{Error, Result};

/// Baseline JPEG at the codec's default quality.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegPhotoEncoder;

impl PhotoEncoder for JpegPhotoEncoder {
    fn name(&self) -> &'static str {
        "jpeg"
    }

    fn extension(&self) -> &'static str {
        "jpg"
    }

    fn encode(&self, image: &DynamicImage) -> Result<Vec<u8>> {
        // JPEG has no alpha or 16-bit support.
        let rgb = image.to_rgb8();

        let mut buf = Vec::new();
        JpegEncoder::new(&mut buf)
            .encode_image(&rgb)
            .map_err(|e| Error::Encode(e.to_string()))?;

        Ok(buf)
    }
}

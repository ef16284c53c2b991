//! Bitmap to JPEG conversion.
//!
//! Decoding and encoding are split behind two narrow traits,
//! [`BitmapDecoder`] and [`PhotoEncoder`], and paired up by a
//! [`Converter`]. The upload handler only ever talks to the converter, so a
//! stricter decoder or a different output codec can be dropped in without
//! touching the HTTP layer.

mod jpeg;
mod pnm;

use std::sync::Arc;

use image::DynamicImage;

use crate::error::Result;

pub use jpeg::JpegPhotoEncoder;
pub use pnm::PnmBitmapDecoder;

/// Turns raw upload bytes into pixels.
///
/// Implementations must be safe to share across threads (`Send + Sync`).
pub trait BitmapDecoder: Send + Sync {
    /// Human-readable name identifying this decoder.
    fn name(&self) -> &'static str;

    /// Decode `data` into an in-memory image.
    ///
    /// Fails with [`Error::Decode`](crate::error::Error::Decode) when the
    /// bytes are not an image this decoder accepts.
    fn decode(&self, data: &[u8]) -> Result<DynamicImage>;
}

/// Turns pixels into a compressed file body.
pub trait PhotoEncoder: Send + Sync {
    /// Human-readable name identifying this encoder.
    fn name(&self) -> &'static str;

    /// File extension (without the dot) for files produced by this encoder.
    fn extension(&self) -> &'static str;

    /// Encode `image` with the encoder's default settings.
    ///
    /// Fails with [`Error::Encode`](crate::error::Error::Encode).
    fn encode(&self, image: &DynamicImage) -> Result<Vec<u8>>;
}

/// A decoder/encoder pair.
///
/// Cheap to clone; both halves live behind `Arc`.
#[derive(Clone)]
pub struct Converter {
    decoder: Arc<dyn BitmapDecoder>,
    encoder: Arc<dyn PhotoEncoder>,
}

impl Converter {
    pub fn new(decoder: Arc<dyn BitmapDecoder>, encoder: Arc<dyn PhotoEncoder>) -> Self {
        Self { decoder, encoder }
    }

    /// Decode `data` and re-encode it.
    ///
    /// CPU-bound; async callers should run this on the blocking pool.
    pub fn convert(&self, data: &[u8]) -> Result<Vec<u8>> {
        let image = self.decoder.decode(data)?;
        tracing::debug!(
            decoder = self.decoder.name(),
            encoder = self.encoder.name(),
            width = image.width(),
            height = image.height(),
            "Decoded bitmap"
        );
        self.encoder.encode(&image)
    }

    /// Extension of the files this converter produces.
    pub fn extension(&self) -> &'static str {
        self.encoder.extension()
    }
}

impl Default for Converter {
    /// Any netpbm image in, baseline JPEG out.
    fn default() -> Self {
        Self::new(Arc::new(PnmBitmapDecoder), Arc::new(JpegPhotoEncoder))
    }
}

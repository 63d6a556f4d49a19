//! WebP encoding of rendered surfaces.
//!
//! The encoder takes straight (non-premultiplied) RGBA, so the premultiplied
//! `tiny-skia` pixels are demultiplied first. Quality 100 selects lossless
//! compression; anything lower is lossy at that quality.

use tiny_skia::Pixmap;
use tracing::debug;

use crate::error::{ConversionError, ConversionResult};

/// Highest encoder quality; also the value that selects lossless mode.
pub const MAX_QUALITY: u8 = 100;

/// Quality actually handed to the encoder.
///
/// Lossless requests always encode at 100, whatever quality was asked for.
pub fn effective_quality(quality: u8, lossless: bool) -> u8 {
    if lossless {
        MAX_QUALITY
    } else {
        quality.min(MAX_QUALITY)
    }
}

/// Encode a rendered pixmap as WebP.
pub fn encode_webp(pixmap: &Pixmap, quality: u8) -> ConversionResult<Vec<u8>> {
    let rgba = demultiplied_rgba(pixmap);
    let lossless = quality >= MAX_QUALITY;

    debug!(
        width = pixmap.width(),
        height = pixmap.height(),
        quality,
        lossless,
        "Encoding WebP"
    );

    let encoder = webp::Encoder::from_rgba(&rgba, pixmap.width(), pixmap.height());
    let encoded = encoder
        .encode_simple(lossless, f32::from(quality))
        .map_err(|e| ConversionError::Encode(format!("{:?}", e)))?;

    Ok(encoded.to_vec())
}

/// Snapshot the pixmap into a straight-alpha RGBA buffer.
fn demultiplied_rgba(pixmap: &Pixmap) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }
    rgba
}

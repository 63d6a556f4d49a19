//! Target raster sizing.
//!
//! Output dimensions are the natural SVG dimensions multiplied by the scale
//! factor and rounded up, with each side clamped to a 400 pixel floor so tiny
//! source graphics still produce a usable image.

use crate::error::{ConversionError, ConversionResult};

/// Minimum width and height of any rendered raster, in pixels.
pub const MIN_RASTER_DIMENSION: u32 = 400;

/// Largest surface, in pixels, the pipeline will allocate (1 GiB of RGBA).
pub const MAX_RASTER_PIXELS: u64 = 16384 * 16384;

/// Pixel dimensions of a raster surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterSize {
    pub width: u32,
    pub height: u32,
}

impl RasterSize {
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Compute the raster size for a document with the given natural bounds.
///
/// # Arguments
/// * `natural_width` - Document width in SVG user units
/// * `natural_height` - Document height in SVG user units
/// * `scale_factor` - Multiplier applied before rounding up
///
/// # Errors
/// `InvalidDocument` when either natural dimension is not positive or the
/// scaled size overflows, `InvalidScale` for a non-positive or non-finite
/// scale factor, `SurfaceAllocation` when the raster would exceed
/// [`MAX_RASTER_PIXELS`].
pub fn target_dimensions(
    natural_width: f32,
    natural_height: f32,
    scale_factor: f32,
) -> ConversionResult<RasterSize> {
    if !scale_factor.is_finite() || scale_factor <= 0.0 {
        return Err(ConversionError::InvalidScale(scale_factor));
    }

    // NaN fails both comparisons, so test for the positive case
    if !(natural_width > 0.0 && natural_height > 0.0) {
        return Err(ConversionError::InvalidDocument(format!(
            "empty bounding box {}x{}",
            natural_width, natural_height
        )));
    }

    let size = RasterSize {
        width: scaled_dimension(natural_width, scale_factor)?,
        height: scaled_dimension(natural_height, scale_factor)?,
    };

    if size.pixel_count() > MAX_RASTER_PIXELS {
        return Err(ConversionError::SurfaceAllocation {
            width: size.width,
            height: size.height,
        });
    }

    Ok(size)
}

fn scaled_dimension(natural: f32, scale_factor: f32) -> ConversionResult<u32> {
    let scaled = (f64::from(natural) * f64::from(scale_factor)).ceil();
    if !scaled.is_finite() || scaled > f64::from(u32::MAX) {
        return Err(ConversionError::InvalidDocument(format!(
            "scaled dimension {} is too large",
            scaled
        )));
    }
    Ok((scaled as u32).max(MIN_RASTER_DIMENSION))
}

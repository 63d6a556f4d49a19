//! SVG to WebP conversion.
//!
//! Parses SVG documents with `usvg`, rasterizes them with `resvg` onto a
//! `tiny-skia` surface at a configurable scale, and encodes the result as
//! WebP through libwebp.
//!
//! - [`sizing`]: target raster dimensions from natural bounds and scale
//! - [`pipeline`]: parse, size, render and encode
//! - [`encode`]: WebP encoding of a rendered surface

pub mod encode;
pub mod error;
pub mod pipeline;
pub mod sizing;

pub use encode::{effective_quality, encode_webp};
pub use error::{ConversionError, ConversionResult};
pub use pipeline::{convert_svg_to_webp, ConversionOptions, RasterSurface, SvgConverter};
pub use sizing::{target_dimensions, RasterSize, MAX_RASTER_PIXELS, MIN_RASTER_DIMENSION};

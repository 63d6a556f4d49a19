//! HTTP request handlers for the conversion API.

pub mod conversion;
pub mod health;

pub use conversion::{convert_svg_to_webp_handler, ConversionRequest};
pub use health::{health_handler, metrics_handler};

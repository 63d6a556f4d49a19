//! SVG parse, rasterize and encode pipeline.
//!
//! A conversion runs entirely on the calling thread:
//! 1. Parse the SVG bytes into a `usvg::Tree`
//! 2. Read its natural size and compute the raster size (see [`crate::sizing`])
//! 3. Allocate a transparent RGBA surface
//! 4. Render the tree with a uniform scale transform
//! 5. Encode the surface as WebP (see [`crate::encode`])
//!
//! The tree and surface live only for the duration of one call.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use tiny_skia::Pixmap;
use tracing::{debug, info, instrument};

use crate::encode::{effective_quality, encode_webp};
use crate::error::{ConversionError, ConversionResult};
use crate::sizing::{target_dimensions, RasterSize};

/// Default encoder quality when none is requested.
pub const DEFAULT_QUALITY: u8 = 100;

/// Default scale factor applied to the natural SVG size.
pub const DEFAULT_SCALE_FACTOR: f32 = 4.0;

/// Per-call conversion settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionOptions {
    /// Encoder quality in `0..=100`, ignored when `lossless` is set
    pub quality: u8,
    /// Encode losslessly (forces quality 100)
    pub lossless: bool,
    /// Multiplier applied to the natural document size
    pub scale_factor: f32,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            lossless: true,
            scale_factor: DEFAULT_SCALE_FACTOR,
        }
    }
}

impl ConversionOptions {
    pub fn new(quality: u8, lossless: bool, scale_factor: f32) -> Self {
        Self {
            quality,
            lossless,
            scale_factor,
        }
    }

    /// Quality handed to the encoder after applying the lossless override.
    pub fn encode_quality(&self) -> u8 {
        effective_quality(self.quality, self.lossless)
    }
}

/// A rendered raster: premultiplied RGBA pixels plus the natural size of the
/// document they were rendered from.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixmap: Pixmap,
    natural_width: f32,
    natural_height: f32,
}

impl RasterSurface {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> RasterSize {
        RasterSize {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Natural document size in SVG user units.
    pub fn natural_size(&self) -> (f32, f32) {
        (self.natural_width, self.natural_height)
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Encode this surface as WebP at the given quality.
    pub fn encode(&self, quality: u8) -> ConversionResult<Vec<u8>> {
        encode_webp(&self.pixmap, quality)
    }
}

/// Converts SVG documents to WebP.
///
/// Holds the font database used for text rendering so system fonts are
/// scanned once rather than per conversion. Cheap to share behind an `Arc`.
#[derive(Clone)]
pub struct SvgConverter {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for SvgConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SvgConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgConverter")
            .field("font_faces", &self.fontdb.len())
            .finish()
    }
}

impl SvgConverter {
    /// Create a converter with the system fonts loaded.
    pub fn new() -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        info!(font_faces = fontdb.len(), "Loaded system fonts");
        Self::with_fontdb(Arc::new(fontdb))
    }

    /// Create a converter around an existing font database.
    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { fontdb }
    }

    fn parse_options(&self) -> usvg::Options<'_> {
        let mut opt = usvg::Options::default();
        opt.fontdb = Arc::clone(&self.fontdb);
        opt.shape_rendering = usvg::ShapeRendering::GeometricPrecision;
        opt.text_rendering = usvg::TextRendering::OptimizeLegibility;
        opt.image_rendering = usvg::ImageRendering::OptimizeQuality;
        opt
    }

    /// Parse SVG bytes into a render tree.
    fn load(&self, svg_data: &[u8]) -> ConversionResult<usvg::Tree> {
        let tree = usvg::Tree::from_data(svg_data, &self.parse_options())?;
        if tree.root().children().is_empty() {
            return Err(ConversionError::InvalidDocument(
                "document has no drawable content".to_string(),
            ));
        }
        Ok(tree)
    }

    /// Render SVG bytes onto a surface sized by the sizing policy.
    pub fn render(
        &self,
        svg_data: &[u8],
        options: &ConversionOptions,
    ) -> ConversionResult<RasterSurface> {
        let tree = self.load(svg_data)?;
        render_tree(&tree, options.scale_factor)
    }

    /// Convert SVG bytes to WebP bytes.
    #[instrument(skip(self, svg_data), fields(svg_bytes = svg_data.len()))]
    pub fn convert(
        &self,
        svg_data: &[u8],
        options: &ConversionOptions,
    ) -> ConversionResult<Vec<u8>> {
        let surface = self.render(svg_data, options)?;
        let webp_data = surface.encode(options.encode_quality())?;

        debug!(
            width = surface.width(),
            height = surface.height(),
            webp_bytes = webp_data.len(),
            "Converted SVG to WebP"
        );

        Ok(webp_data)
    }

    /// Convert an SVG file and write the WebP result to `webp_path`.
    ///
    /// Returns the number of bytes written.
    pub fn convert_file(
        &self,
        svg_path: impl AsRef<Path>,
        webp_path: impl AsRef<Path>,
        options: &ConversionOptions,
    ) -> ConversionResult<u64> {
        let svg_path = svg_path.as_ref();
        let webp_path = webp_path.as_ref();

        let svg_data = std::fs::read(svg_path)?;
        let tree = self.load(&svg_data).map_err(|e| match e {
            ConversionError::Load(message) => ConversionError::LoadFile {
                path: svg_path.to_path_buf(),
                message,
            },
            other => other,
        })?;

        let surface = render_tree(&tree, options.scale_factor)?;
        drop(tree);

        let webp_data = surface.encode(options.encode_quality())?;
        std::fs::write(webp_path, &webp_data)?;

        debug!(
            input = %svg_path.display(),
            output = %webp_path.display(),
            bytes = webp_data.len(),
            "Wrote WebP file"
        );

        Ok(webp_data.len() as u64)
    }
}

/// Rasterize a parsed tree at the given scale.
fn render_tree(tree: &usvg::Tree, scale_factor: f32) -> ConversionResult<RasterSurface> {
    let natural = tree.size();
    let size = target_dimensions(natural.width(), natural.height(), scale_factor)?;

    debug!(
        natural_width = natural.width(),
        natural_height = natural.height(),
        scale_factor,
        width = size.width,
        height = size.height,
        "Rendering SVG"
    );

    // New pixmaps are fully transparent
    let mut pixmap = Pixmap::new(size.width, size.height).ok_or(
        ConversionError::SurfaceAllocation {
            width: size.width,
            height: size.height,
        },
    )?;

    let transform = tiny_skia::Transform::from_scale(scale_factor, scale_factor);
    resvg::render(tree, transform, &mut pixmap.as_mut());

    Ok(RasterSurface {
        pixmap,
        natural_width: natural.width(),
        natural_height: natural.height(),
    })
}

/// Convert SVG bytes to WebP using a process-wide converter.
///
/// The shared converter is built on first use.
pub fn convert_svg_to_webp(
    svg_data: &[u8],
    quality: u8,
    lossless: bool,
    scale_factor: f32,
) -> ConversionResult<Vec<u8>> {
    static SHARED: OnceLock<SvgConverter> = OnceLock::new();
    SHARED
        .get_or_init(SvgConverter::new)
        .convert(svg_data, &ConversionOptions::new(quality, lossless, scale_factor))
}

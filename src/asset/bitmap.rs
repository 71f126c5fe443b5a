//! Decoded hair assets.

use std::path::Path;

use image::RgbaImage;
use resvg::tiny_skia::{ColorU8, Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use tracing::debug;

use crate::error::{Error, Result};

/// Longest side an SVG asset is rasterized to when no size is given.
pub const DEFAULT_SVG_SIZE: u32 = 1024;

/// A premultiplied RGBA bitmap ready to be composited.
#[derive(Clone)]
pub struct AssetBitmap {
    pixmap: Pixmap,
}

impl AssetBitmap {
    /// Wraps a straight-alpha image.
    pub fn from_rgba_image(img: &RgbaImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        let mut pixmap =
            Pixmap::new(width, height).ok_or(Error::SurfaceAllocation { width, height })?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        Ok(Self { pixmap })
    }

    /// Decodes PNG, JPEG or any other format `image` understands, or SVG
    /// markup.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if looks_like_svg(bytes) {
            let svg = std::str::from_utf8(bytes).map_err(|e| Error::Svg(e.to_string()))?;
            return Self::from_svg(svg, DEFAULT_SVG_SIZE);
        }
        let img = image::load_from_memory(bytes)?.to_rgba8();
        debug!(width = img.width(), height = img.height(), "decoded raster asset");
        Self::from_rgba_image(&img)
    }

    /// Rasterizes SVG markup so its longer side is `size` pixels.
    pub fn from_svg(svg: &str, size: u32) -> Result<Self> {
        let tree = Tree::from_str(svg, &Options::default()).map_err(|e| Error::Svg(e.to_string()))?;

        let svg_size = tree.size();
        let scale = size as f32 / svg_size.width().max(svg_size.height());
        let width = (svg_size.width() * scale).ceil() as u32;
        let height = (svg_size.height() * scale).ceil() as u32;

        let mut pixmap =
            Pixmap::new(width, height).ok_or(Error::SurfaceAllocation { width, height })?;
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
        debug!(width, height, "rasterized svg asset");

        Ok(Self { pixmap })
    }

    /// Reads and decodes an asset file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

impl std::fmt::Debug for AssetBitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetBitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

//! tiny-skia backed raster surface.

use std::path::Path as FsPath;

use image::{Rgba, RgbaImage};
use palette::Srgba;
use resvg::tiny_skia::{
    self, BlendMode, Color, FillRule, FilterQuality, Pixmap, PixmapPaint, Shader, SpreadMode,
    Stroke, Transform,
};
use tracing::warn;

use super::blur::{Region, gaussian_blur};
use super::{Surface, TransformStack};
use crate::asset::AssetBitmap;
use crate::error::{Error, Result};
use crate::geometry::{Rect, SurfaceSize};
use crate::path::Path;
use crate::scene::{DropShadow, Paint};

/// An RGBA raster surface.
pub struct PixmapSurface {
    pixmap: Pixmap,
    transforms: TransformStack,
}

impl PixmapSurface {
    /// Allocates a transparent surface.
    pub fn new(size: SurfaceSize) -> Result<Self> {
        Ok(Self {
            pixmap: allocate(size)?,
            transforms: TransformStack::default(),
        })
    }

    /// Reallocates to a new size if it differs, e.g. after a camera
    /// resolution change. Contents are discarded.
    pub fn resize(&mut self, size: SurfaceSize) -> Result<()> {
        if size != self.size() {
            self.pixmap = allocate(size)?;
        }
        Ok(())
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Saves still open on the transform stack.
    pub fn save_depth(&self) -> usize {
        self.transforms.depth()
    }

    /// Copies the surface into a straight-alpha image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        pixmap_to_rgba_image(&self.pixmap)
    }

    /// Writes the surface as a PNG file.
    pub fn save_png(&self, path: impl AsRef<FsPath>) -> Result<()> {
        self.to_rgba_image().save(path)?;
        Ok(())
    }

    fn draw_shadow(&mut self, path: &Path, skia_path: &tiny_skia::Path, alpha: f32, shadow: &DropShadow) {
        let alpha = (shadow.alpha * alpha).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let ts = self.transforms.current().post_translate(0.0, shadow.offset_y);
        let sigma = shadow.blur / 2.0;
        let Some(bounds) = path.transformed(ts).bounds() else {
            return;
        };
        let Some(region) = Region::around(
            bounds.x,
            bounds.y,
            bounds.right(),
            bounds.bottom(),
            (sigma * 3.0).ceil() + 2.0,
            self.pixmap.width(),
            self.pixmap.height(),
        ) else {
            return;
        };
        // The layer only covers the blurred region.
        let (x0, y0) = (region.x0 as f32, region.y0 as f32);
        let Some(mut layer) = Pixmap::new(region.width() as u32, region.height() as u32) else {
            return;
        };

        let mut paint = tiny_skia::Paint::default();
        paint.set_color(Color::from_rgba(0.0, 0.0, 0.0, alpha).unwrap_or(Color::BLACK));
        paint.anti_alias = true;
        layer.fill_path(skia_path, &paint, FillRule::Winding, ts.post_translate(-x0, -y0), None);
        let layer_region = Region::covering(&layer);
        gaussian_blur(&mut layer, layer_region, sigma);

        self.pixmap.draw_pixmap(
            region.x0 as i32,
            region.y0 as i32,
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }
}

fn allocate(size: SurfaceSize) -> Result<Pixmap> {
    Pixmap::new(size.width, size.height).ok_or(Error::SurfaceAllocation {
        width: size.width,
        height: size.height,
    })
}

impl Surface for PixmapSurface {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.pixmap.width(), self.pixmap.height())
    }

    fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    fn save(&mut self) {
        self.transforms.save();
    }

    fn restore(&mut self) {
        if !self.transforms.restore() {
            warn!("restore without a matching save");
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transforms.translate(dx, dy);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.transforms.scale(sx, sy);
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint, opacity: f32, shadow: Option<&DropShadow>) {
        let Some(skia_path) = path.to_skia() else {
            return;
        };
        if let Some(shadow) = shadow {
            self.draw_shadow(path, &skia_path, paint_alpha(paint) * opacity, shadow);
        }
        let Some(skia_paint) = skia_paint(paint, opacity) else {
            return;
        };
        let ts = self.transforms.current();
        self.pixmap
            .fill_path(&skia_path, &skia_paint, FillRule::Winding, ts, None);
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint, opacity: f32, width: f32) {
        let (Some(skia_path), Some(skia_paint)) = (path.to_skia(), skia_paint(paint, opacity))
        else {
            return;
        };
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        let ts = self.transforms.current();
        self.pixmap
            .stroke_path(&skia_path, &skia_paint, &stroke, ts, None);
    }

    fn draw_image(&mut self, image: &AssetBitmap, dest: Rect, opacity: f32) {
        if image.width() == 0 || image.height() == 0 {
            return;
        }
        let ts = self
            .transforms
            .current()
            .pre_translate(dest.x, dest.y)
            .pre_scale(
                dest.width / image.width() as f32,
                dest.height / image.height() as f32,
            );

        let mut paint = PixmapPaint::default();
        paint.opacity = opacity.clamp(0.0, 1.0);
        paint.quality = FilterQuality::Bilinear;
        paint.blend_mode = BlendMode::SourceOver;
        self.pixmap
            .draw_pixmap(0, 0, image.pixmap().as_ref(), &paint, ts, None);
    }
}

// ============================================================================
// Paint conversion
// ============================================================================

fn skia_color(color: Srgba, opacity: f32) -> Color {
    Color::from_rgba(
        color.red.clamp(0.0, 1.0),
        color.green.clamp(0.0, 1.0),
        color.blue.clamp(0.0, 1.0),
        (color.alpha * opacity).clamp(0.0, 1.0),
    )
    .unwrap_or(Color::TRANSPARENT)
}

fn skia_paint(paint: &Paint, opacity: f32) -> Option<tiny_skia::Paint<'static>> {
    let shader = match paint {
        Paint::Solid(color) => Shader::SolidColor(skia_color(*color, opacity)),
        Paint::LinearGradient { start, end, stops } => tiny_skia::LinearGradient::new(
            tiny_skia::Point::from_xy(start.x, start.y),
            tiny_skia::Point::from_xy(end.x, end.y),
            stops
                .iter()
                .map(|s| tiny_skia::GradientStop::new(s.offset, skia_color(s.color, opacity)))
                .collect(),
            SpreadMode::Pad,
            Transform::identity(),
        )?,
    };
    let mut skia_paint = tiny_skia::Paint::default();
    skia_paint.shader = shader;
    skia_paint.anti_alias = true;
    Some(skia_paint)
}

/// Strongest alpha a paint can produce, used to scale its shadow.
fn paint_alpha(paint: &Paint) -> f32 {
    match paint {
        Paint::Solid(color) => color.alpha,
        Paint::LinearGradient { stops, .. } => {
            stops.iter().map(|s| s.color.alpha).fold(0.0, f32::max)
        }
    }
}

// ============================================================================
// Pixel export
// ============================================================================

/// Straight-alpha copy of a premultiplied pixmap.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        pixmap
            .pixel(x, y)
            .map(|p| {
                let c = p.demultiply();
                Rgba([c.red(), c.green(), c.blue(), c.alpha()])
            })
            .unwrap_or(Rgba([0, 0, 0, 0]))
    })
}

//! Presentation surfaces.
//!
//! The renderers only ever talk to the [`Surface`] trait. Two implementations
//! ship with the crate:
//!
//! - [`PixmapSurface`] rasterizes with tiny-skia and can hand back an
//!   [`image::RgbaImage`].
//! - [`RecordingSurface`] keeps a device-space log of draw calls, which is what
//!   geometric tests and tooling inspect.

mod blur;
pub mod raster;
pub mod recording;

pub use raster::PixmapSurface;
pub use recording::{DrawCommand, RecordingSurface};

use resvg::tiny_skia::Transform;

use crate::asset::AssetBitmap;
use crate::geometry::{Rect, SurfaceSize};
use crate::path::Path;
use crate::scene::{DropShadow, Paint};

// ============================================================================
// Surface
// ============================================================================

/// A 2D drawing surface with an affine transform stack.
///
/// Transform calls compose like an HTML canvas: each new transform applies to
/// points before the ones already in effect.
pub trait Surface {
    /// Current pixel dimensions.
    fn size(&self) -> SurfaceSize;

    /// Erases the whole surface to transparent, ignoring the transform.
    fn clear(&mut self);

    /// Pushes the current transform.
    fn save(&mut self);

    /// Pops back to the last saved transform. Extra restores are ignored.
    fn restore(&mut self);

    fn translate(&mut self, dx: f32, dy: f32);

    fn scale(&mut self, sx: f32, sy: f32);

    /// Fills a path, optionally with a drop shadow beneath it.
    fn fill_path(&mut self, path: &Path, paint: &Paint, opacity: f32, shadow: Option<&DropShadow>);

    fn stroke_path(&mut self, path: &Path, paint: &Paint, opacity: f32, width: f32);

    /// Draws `image` stretched to `dest` at the given global alpha.
    fn draw_image(&mut self, image: &AssetBitmap, dest: Rect, opacity: f32);
}

// ============================================================================
// TransformStack
// ============================================================================

/// Save/restore bookkeeping shared by the surface implementations.
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    current: Transform,
    saved: Vec<Transform>,
}

impl TransformStack {
    pub fn current(&self) -> Transform {
        self.current
    }

    /// Number of saves not yet restored.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Returns `false` when there was nothing to restore.
    pub fn restore(&mut self) -> bool {
        match self.saved.pop() {
            Some(ts) => {
                self.current = ts;
                true
            }
            None => false,
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.current = self.current.pre_translate(dx, dy);
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.current = self.current.pre_scale(sx, sy);
    }
}

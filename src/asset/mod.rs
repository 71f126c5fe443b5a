//! Bitmap hair assets and their placement over the face.

mod bitmap;
mod load;

pub use bitmap::{AssetBitmap, DEFAULT_SVG_SIZE};
pub use load::{AssetLoader, AssetSource};

use tracing::trace;

use crate::config::RenderConfig;
use crate::geometry::Rect;
use crate::reference::ReferenceFrame;
use crate::surface::Surface;

/// Asset width as a multiple of the face width.
pub const WIDTH_FACTOR: f32 = 1.55;

/// Asset height as a multiple of the face height.
pub const HEIGHT_FACTOR: f32 = 1.35;

/// How far above the forehead top the asset starts, as a fraction of its height.
pub const LIFT_FACTOR: f32 = 0.42;

/// Where and how strongly an asset is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetPlacement {
    pub dest: Rect,
    pub opacity: f32,
}

/// Destination box for an asset, in camera-natural pixels.
///
/// Horizontally centered on the frame center (which already carries the
/// horizontal offset); the top sits `0.42 * height` above the forehead.
/// `None` when the box has no area.
pub fn placement(frame: &ReferenceFrame, config: &RenderConfig) -> Option<AssetPlacement> {
    let width = frame.face_width * WIDTH_FACTOR * config.scale;
    let height = frame.face_height * HEIGHT_FACTOR * config.scale;
    let x = frame.center.x - width / 2.0;
    let y = frame.anchors.forehead_top.y - height * LIFT_FACTOR + config.offset_y;

    let dest = Rect::new(x, y, width, height);
    (dest.area() > 0.0 && dest.area().is_finite()).then_some(AssetPlacement {
        dest,
        opacity: config.opacity,
    })
}

/// Draws `asset` onto the surface's current transform. Does nothing without
/// an asset or with an empty placement.
pub fn render<S: Surface + ?Sized>(
    frame: &ReferenceFrame,
    config: &RenderConfig,
    asset: Option<&AssetBitmap>,
    surface: &mut S,
) {
    let Some(asset) = asset else {
        return;
    };
    let Some(AssetPlacement { dest, opacity }) = placement(frame, config) else {
        trace!("asset placement has no area, skipping");
        return;
    };
    surface.draw_image(asset, dest, opacity);
}

//! Procedural hairstyles.
//!
//! Every style is built from the same handful of measurements, all
//! proportional to `u = headUnit * scale`:
//!
//! - `leftX` / `rightX`: the temples pushed outward by `0.10u`
//! - `topY`: the crown, `0.55u` above the forehead top
//! - `hairlineMid`: halfway between the forehead top and the nose bridge
//!
//! A style first lays down its silhouette with a soft shadow, then a detail
//! layer in a darker tone. Styles only build a [`Scene`]; nothing is drawn
//! until [`Scene::draw`].

mod buzz;
mod fade;
mod fringe;
mod long;
mod pompadour;

pub use fringe::FRINGE_SPIKES;
pub use long::LONG_STRANDS;

use palette::Srgba;
use tracing::trace;

use crate::color::HairColor;
use crate::config::{HairStyle, RenderConfig};
use crate::geometry::Point;
use crate::path::Path;
use crate::reference::{AnchorPoints, ReferenceFrame};
use crate::scene::{DropShadow, Paint, Scene, Shape, ShapeRole};
use crate::surface::Surface;

impl HairStyle {
    /// Builds the shapes for this style. [`HairStyle::None`] yields an empty
    /// scene.
    pub fn scene(&self, frame: &ReferenceFrame, config: &RenderConfig) -> Scene {
        let g = StyleGeometry::new(frame, config);
        let scene = match self {
            HairStyle::None => Scene::new(),
            HairStyle::Buzz => buzz::scene(&g),
            HairStyle::Fade => fade::scene(&g),
            HairStyle::Fringe => fringe::scene(&g),
            HairStyle::Pompadour => pompadour::scene(&g),
            HairStyle::Long => long::scene(&g),
        };
        trace!(style = %self, shapes = scene.len(), "built style scene");
        scene
    }

    /// Silhouette shadow alpha, before opacity.
    pub fn shadow_alpha(&self) -> Option<f32> {
        match self {
            HairStyle::None => None,
            HairStyle::Buzz => Some(buzz::SHADOW_ALPHA),
            HairStyle::Fade => Some(fade::SHADOW_ALPHA),
            HairStyle::Fringe => Some(fringe::SHADOW_ALPHA),
            HairStyle::Pompadour => Some(pompadour::SHADOW_ALPHA),
            HairStyle::Long => Some(long::SHADOW_ALPHA),
        }
    }
}

/// Draws `config.style` onto the surface's current transform.
pub fn render<S: Surface + ?Sized>(frame: &ReferenceFrame, config: &RenderConfig, surface: &mut S) {
    config.style.scene(frame, config).draw(surface);
}

// ============================================================================
// Shared geometry
// ============================================================================

/// Measurements and tones every style draws from.
pub(crate) struct StyleGeometry {
    /// Anchors with the user offsets applied.
    pub a: AnchorPoints,
    /// Head unit times scale.
    pub unit: f32,
    pub cx: f32,
    pub left_x: f32,
    pub right_x: f32,
    pub top_y: f32,
    pub hairline_mid: Point,
    pub opacity: f32,
    /// Base color at the configured opacity.
    pub fill: Srgba,
    /// Darker detail tone.
    pub detail: Srgba,
    /// Base color, for paints that set their own alpha.
    pub color: HairColor,
}

impl StyleGeometry {
    pub fn new(frame: &ReferenceFrame, config: &RenderConfig) -> Self {
        let a = frame.placed_anchors();
        let unit = frame.head_unit * config.scale;
        Self {
            unit,
            cx: frame.center.x,
            left_x: a.left_temple.x - unit * 0.10,
            right_x: a.right_temple.x + unit * 0.10,
            top_y: a.forehead_top.y - unit * 0.55,
            hairline_mid: a.forehead_top.midpoint(&a.nose_bridge),
            opacity: config.opacity,
            fill: config.color.with_alpha(config.opacity),
            detail: config.color.detail_tone(config.opacity),
            color: config.color,
            a,
        }
    }

    /// `factor` head units.
    pub fn u(&self, factor: f32) -> f32 {
        self.unit * factor
    }

    /// Evenly spaced x positions from `left_x` to `right_x`, ends included.
    pub fn spread(&self, count: usize) -> impl Iterator<Item = (f32, f32)> + '_ {
        let steps = count.saturating_sub(1).max(1) as f32;
        (0..count).map(move |i| {
            let t = i as f32 / steps;
            (t, self.left_x + (self.right_x - self.left_x) * t)
        })
    }

    /// Quadratic cap over the scalp: temples up to the crown, then back
    /// down through the hairline. `dip_side` and `dip_mid` push the side
    /// control points and the hairline center below `hairlineMid`.
    pub fn cap(&self, dip_side: f32, dip_mid: f32) -> Path {
        let (lt, rt, hm) = (self.a.left_temple, self.a.right_temple, self.hairline_mid);
        let mut path = Path::new();
        path.move_to(Point::new(self.left_x, lt.y))
            .quad_to(Point::new(self.cx, self.top_y), Point::new(self.right_x, rt.y))
            .quad_to(
                Point::new(rt.x, hm.y + self.u(dip_side)),
                Point::new(self.cx, hm.y + self.u(dip_mid)),
            )
            .quad_to(
                Point::new(lt.x, hm.y + self.u(dip_side)),
                Point::new(self.left_x, lt.y),
            )
            .close();
        path
    }

    /// The silhouette shape: base color, soft shadow.
    pub fn silhouette(&self, path: Path, shadow_alpha: f32) -> Shape {
        Shape::fill(ShapeRole::Silhouette, path, Paint::Solid(self.fill))
            .with_shadow(DropShadow::soft(shadow_alpha))
    }
}

//! Layered drawable scene produced by the style renderers.
//!
//! A [`Scene`] is plain data: an ordered list of [`Shape`]s, silhouette first,
//! details on top. Drawing it onto a [`Surface`] is the only side effect.

use palette::Srgba;

use crate::geometry::{Point, Rect};
use crate::path::Path;
use crate::surface::Surface;

// ============================================================================
// Paint
// ============================================================================

/// One stop of a linear gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Srgba,
}

/// Fill or stroke source.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Srgba),
    LinearGradient {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    /// A two-stop gradient from `from` at `start` to `to` at `end`.
    pub fn linear(start: Point, end: Point, from: Srgba, to: Srgba) -> Self {
        Paint::LinearGradient {
            start,
            end,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: from,
                },
                GradientStop {
                    offset: 1.0,
                    color: to,
                },
            ],
        }
    }
}

// ============================================================================
// Shadow
// ============================================================================

/// Soft drop shadow drawn beneath a filled shape.
///
/// `blur` follows canvas `shadowBlur` semantics (Gaussian sigma = blur / 2).
/// The offset is applied in device space, so it stays downward when mirrored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropShadow {
    pub alpha: f32,
    pub blur: f32,
    pub offset_y: f32,
}

impl DropShadow {
    pub const BLUR: f32 = 18.0;
    pub const OFFSET_Y: f32 = 8.0;

    /// The standard silhouette shadow at the given black alpha.
    pub fn soft(alpha: f32) -> Self {
        Self {
            alpha,
            blur: Self::BLUR,
            offset_y: Self::OFFSET_Y,
        }
    }
}

// ============================================================================
// Shape
// ============================================================================

/// Which layer of a hairstyle a shape belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeRole {
    /// The primary filled hair mass.
    Silhouette,
    /// Texture layered over the silhouette.
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Fill,
    Stroke { width: f32 },
}

/// A single drawable shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub role: ShapeRole,
    pub kind: ShapeKind,
    pub path: Path,
    pub paint: Paint,
    /// Global alpha applied on top of the paint's own alpha.
    pub opacity: f32,
    pub shadow: Option<DropShadow>,
}

impl Shape {
    pub fn fill(role: ShapeRole, path: Path, paint: Paint) -> Self {
        Self {
            role,
            kind: ShapeKind::Fill,
            path,
            paint,
            opacity: 1.0,
            shadow: None,
        }
    }

    pub fn stroke(role: ShapeRole, path: Path, paint: Paint, width: f32) -> Self {
        Self {
            role,
            kind: ShapeKind::Stroke { width },
            path,
            paint,
            opacity: 1.0,
            shadow: None,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_shadow(mut self, shadow: DropShadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        match self.kind {
            ShapeKind::Fill => {
                surface.fill_path(&self.path, &self.paint, self.opacity, self.shadow.as_ref())
            }
            ShapeKind::Stroke { width } => {
                surface.stroke_path(&self.path, &self.paint, self.opacity, width)
            }
        }
    }
}

// ============================================================================
// Scene
// ============================================================================

/// Ordered shapes for one rendered hairstyle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// The primary hair mass (the first silhouette shape).
    pub fn silhouette(&self) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.role == ShapeRole::Silhouette)
    }

    pub fn details(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|s| s.role == ShapeRole::Detail)
    }

    /// Control-polygon bounds of every shape.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding(self.shapes.iter().flat_map(|s| s.path.points()))
    }

    /// Draws every shape in order onto the surface's current state.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for shape in &self.shapes {
            shape.draw(surface);
        }
    }
}

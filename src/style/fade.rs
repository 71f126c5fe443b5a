//! Short top with gradient-faded sides.

use crate::geometry::{Point, centroid};
use crate::path::Path;
use crate::scene::{Paint, Scene, Shape, ShapeRole};

use super::StyleGeometry;

pub(super) const SHADOW_ALPHA: f32 = 0.28;

/// Gradient alpha at the temples, relative to the opacity.
const SIDE_ALPHA: f32 = 0.45;

pub(super) fn scene(g: &StyleGeometry) -> Scene {
    let mut scene = Scene::new();
    scene.push(g.silhouette(g.cap(0.05, 0.12), SHADOW_ALPHA));

    let a = &g.a;
    let fade_top = (a.left_temple.y + a.right_temple.y) / 2.0;
    let fade_bottom = centroid(&[a.left_jaw, a.right_jaw, a.chin]).y - g.u(0.10);

    scene.push(side_panel(g, a.left_temple, a.left_jaw, -1.0, fade_top, fade_bottom));
    scene.push(side_panel(g, a.right_temple, a.right_jaw, 1.0, fade_top, fade_bottom));
    scene
}

/// One side panel from the temple down to the jaw. `dir` is -1 for the left
/// side and 1 for the right.
fn side_panel(
    g: &StyleGeometry,
    temple: Point,
    jaw: Point,
    dir: f32,
    fade_top: f32,
    fade_bottom: f32,
) -> Shape {
    let mid_y = (temple.y + jaw.y) / 2.0;
    let out = |p: Point, k: f32| Point::new(p.x + dir * g.u(k), p.y);

    let mut path = Path::new();
    path.move_to(out(temple, 0.10))
        .quad_to(Point::new(temple.x + dir * g.u(0.50), mid_y), out(jaw, 0.30))
        .line_to(out(jaw, 0.10))
        .quad_to(Point::new(temple.x + dir * g.u(0.18), mid_y), temple)
        .close();

    let gradient_x = temple.x + dir * g.u(0.35);
    let paint = Paint::linear(
        Point::new(gradient_x, fade_top),
        Point::new(gradient_x, fade_bottom),
        g.color.with_alpha(g.opacity * SIDE_ALPHA),
        g.color.with_alpha(0.0),
    );
    Shape::fill(ShapeRole::Detail, path, paint)
}

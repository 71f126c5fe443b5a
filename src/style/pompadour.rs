//! High swept-back volume with a highlight ridge.

use palette::Srgba;

use crate::geometry::Point;
use crate::path::Path;
use crate::scene::{Paint, Scene, Shape, ShapeRole};

use super::StyleGeometry;

pub(super) const SHADOW_ALPHA: f32 = 0.33;
const HIGHLIGHT_ALPHA: f32 = 0.12;

pub(super) fn scene(g: &StyleGeometry) -> Scene {
    let (lt, rt, hm) = (g.a.left_temple, g.a.right_temple, g.hairline_mid);
    let (cx, top_y) = (g.cx, g.top_y);

    // The sweep leans right: the second control point reaches further out.
    let start = Point::new(g.left_x, lt.y + g.u(0.08));
    let mut volume = Path::new();
    volume
        .move_to(start)
        .cubic_to(
            Point::new(cx - g.u(0.30), top_y - g.u(0.20)),
            Point::new(cx + g.u(0.55), top_y + g.u(0.05)),
            Point::new(g.right_x, rt.y + g.u(0.02)),
        )
        .quad_to(
            Point::new(rt.x, hm.y + g.u(0.08)),
            Point::new(cx, hm.y + g.u(0.12)),
        )
        .quad_to(Point::new(lt.x, hm.y + g.u(0.08)), start)
        .close();

    let mut ridge = Path::new();
    ridge
        .move_to(Point::new(cx - g.u(0.10), top_y + g.u(0.18)))
        .cubic_to(
            Point::new(cx + g.u(0.10), top_y - g.u(0.05)),
            Point::new(cx + g.u(0.55), top_y + g.u(0.18)),
            Point::new(g.right_x - g.u(0.05), rt.y + g.u(0.05)),
        );
    let highlight = Srgba::new(1.0, 1.0, 1.0, HIGHLIGHT_ALPHA * g.opacity);

    let mut scene = Scene::new();
    scene.push(g.silhouette(volume, SHADOW_ALPHA));
    scene.push(Shape::stroke(
        ShapeRole::Detail,
        ridge,
        Paint::Solid(highlight),
        g.u(0.02).max(2.0),
    ));
    scene
}

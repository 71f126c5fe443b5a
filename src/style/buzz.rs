//! Close-cropped cap with a stubble band.

use crate::geometry::Point;
use crate::path::Path;
use crate::scene::{Paint, Scene, Shape, ShapeRole};

use super::StyleGeometry;

pub(super) const SHADOW_ALPHA: f32 = 0.22;
const STUBBLE_ALPHA: f32 = 0.35;

pub(super) fn scene(g: &StyleGeometry) -> Scene {
    let mut scene = Scene::new();
    scene.push(g.silhouette(g.cap(0.0, 0.10), SHADOW_ALPHA));

    let (lt, rt, hm) = (g.a.left_temple, g.a.right_temple, g.hairline_mid);
    let start = Point::new(g.left_x, lt.y + g.u(0.06));
    let mut band = Path::new();
    band.move_to(start)
        .quad_to(
            Point::new(g.cx, g.top_y + g.u(0.35)),
            Point::new(g.right_x, rt.y + g.u(0.06)),
        )
        .quad_to(Point::new(g.cx, hm.y + g.u(0.22)), start)
        .close();
    scene.push(
        Shape::fill(ShapeRole::Detail, band, Paint::Solid(g.detail))
            .with_opacity(STUBBLE_ALPHA * g.opacity),
    );

    scene
}

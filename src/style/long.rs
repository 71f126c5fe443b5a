//! Shoulder-length hair draped past the jaw.

use crate::geometry::Point;
use crate::path::Path;
use crate::scene::{Paint, Scene, Shape, ShapeRole};

use super::StyleGeometry;

pub(super) const SHADOW_ALPHA: f32 = 0.34;
const STRAND_ALPHA: f32 = 0.28;

/// Number of strand strokes drawn over the drape.
pub const LONG_STRANDS: usize = 8;

pub(super) fn scene(g: &StyleGeometry) -> Scene {
    let a = &g.a;
    let (lt, rt, lj, rj, chin) = (a.left_temple, a.right_temple, a.left_jaw, a.right_jaw, a.chin);
    let cx = g.cx;

    let mut drape = Path::new();
    drape
        .move_to(Point::new(g.left_x, lt.y))
        .quad_to(Point::new(cx, g.top_y), Point::new(g.right_x, rt.y))
        .cubic_to(
            Point::new(rt.x + g.u(0.25), rt.y + g.u(0.45)),
            Point::new(rj.x + g.u(0.25), rj.y + g.u(0.65)),
            Point::new(cx + g.u(0.12), chin.y + g.u(0.35)),
        )
        .cubic_to(
            Point::new(cx - g.u(0.12), chin.y + g.u(0.35)),
            Point::new(lj.x - g.u(0.25), lj.y + g.u(0.65)),
            Point::new(lt.x - g.u(0.25), lt.y + g.u(0.45)),
        )
        .close();

    let mut scene = Scene::new();
    scene.push(g.silhouette(drape, SHADOW_ALPHA));

    let width = g.u(0.012).max(1.5);
    let hm_y = g.hairline_mid.y;
    for (_, x) in g.spread(LONG_STRANDS) {
        let mut strand = Path::new();
        strand.move_to(Point::new(x, hm_y + g.u(0.12))).cubic_to(
            Point::new(x + g.u(0.12), hm_y + g.u(0.55)),
            Point::new(x - g.u(0.10), chin.y + g.u(0.18)),
            Point::new(x + g.u(0.06), chin.y + g.u(0.42)),
        );
        scene.push(
            Shape::stroke(ShapeRole::Detail, strand, Paint::Solid(g.detail), width)
                .with_opacity(STRAND_ALPHA * g.opacity),
        );
    }

    scene
}

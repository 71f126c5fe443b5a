//! Cap with textured spikes falling over the forehead.

use std::f32::consts::PI;

use crate::geometry::Point;
use crate::path::Path;
use crate::scene::{Paint, Scene, Shape, ShapeRole};

use super::StyleGeometry;

pub(super) const SHADOW_ALPHA: f32 = 0.30;
const SPIKE_ALPHA: f32 = 0.55;

/// Number of fringe spikes, spread evenly from `leftX` to `rightX`.
pub const FRINGE_SPIKES: usize = 9;

pub(super) fn scene(g: &StyleGeometry) -> Scene {
    let mut scene = Scene::new();
    scene.push(g.silhouette(g.cap(0.10, 0.16), SHADOW_ALPHA));

    let fringe_y = g.hairline_mid.y + g.u(0.14);
    let fringe_len = g.u(0.30);
    let half_base = g.u(0.06);

    for (t, x) in g.spread(FRINGE_SPIKES) {
        let wobble = (t * PI * 2.0).sin() * g.u(0.04);
        let len = fringe_len * (0.75 + 0.35 * ((t + 0.15) * PI * 3.0).sin());

        let mut spike = Path::new();
        spike
            .move_to(Point::new(x - half_base, fringe_y))
            .quad_to(
                Point::new(x + wobble, fringe_y + len),
                Point::new(x + half_base, fringe_y),
            )
            .close();
        scene.push(
            Shape::fill(ShapeRole::Detail, spike, Paint::Solid(g.detail))
                .with_opacity(SPIKE_ALPHA * g.opacity),
        );
    }

    scene
}

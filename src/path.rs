//! Vector paths in pixel space.

use resvg::tiny_skia;

use crate::geometry::{Point, Rect, centroid};

/// One drawing command of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, to: Point },
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    Close,
}

impl Segment {
    fn points(&self) -> impl Iterator<Item = Point> {
        let pts: [Option<Point>; 3] = match *self {
            Segment::MoveTo(p) | Segment::LineTo(p) => [Some(p), None, None],
            Segment::QuadTo { ctrl, to } => [Some(ctrl), Some(to), None],
            Segment::CubicTo { ctrl1, ctrl2, to } => [Some(ctrl1), Some(ctrl2), Some(to)],
            Segment::Close => [None, None, None],
        };
        pts.into_iter().flatten()
    }

    fn map(self, f: impl Fn(Point) -> Point) -> Segment {
        match self {
            Segment::MoveTo(p) => Segment::MoveTo(f(p)),
            Segment::LineTo(p) => Segment::LineTo(f(p)),
            Segment::QuadTo { ctrl, to } => Segment::QuadTo {
                ctrl: f(ctrl),
                to: f(to),
            },
            Segment::CubicTo { ctrl1, ctrl2, to } => Segment::CubicTo {
                ctrl1: f(ctrl1),
                ctrl2: f(ctrl2),
                to: f(to),
            },
            Segment::Close => Segment::Close,
        }
    }
}

/// A path assembled with canvas-style commands.
///
/// Bounds and centroid are computed over the control polygon (end points and
/// control points), which is stable under scaling and translation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.segments.push(Segment::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.segments.push(Segment::LineTo(p));
        self
    }

    pub fn quad_to(&mut self, ctrl: Point, to: Point) -> &mut Self {
        self.segments.push(Segment::QuadTo { ctrl, to });
        self
    }

    pub fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) -> &mut Self {
        self.segments.push(Segment::CubicTo { ctrl1, ctrl2, to });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.segments.push(Segment::Close);
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// All end points and control points, in order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().flat_map(|s| s.points())
    }

    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding(self.points())
    }

    pub fn centroid(&self) -> Point {
        centroid(&self.points().collect::<Vec<_>>())
    }

    pub fn is_finite(&self) -> bool {
        self.points().all(|p| p.is_finite())
    }

    /// A copy with every point passed through `f`.
    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Path {
        Path {
            segments: self.segments.iter().map(|s| s.map(&f)).collect(),
        }
    }

    /// A copy with every point passed through an affine transform.
    pub fn transformed(&self, ts: tiny_skia::Transform) -> Path {
        self.map_points(|p| {
            Point::new(
                ts.sx * p.x + ts.kx * p.y + ts.tx,
                ts.ky * p.x + ts.sy * p.y + ts.ty,
            )
        })
    }

    /// Converts to a tiny-skia path. `None` for empty or non-finite paths.
    pub fn to_skia(&self) -> Option<tiny_skia::Path> {
        let mut pb = tiny_skia::PathBuilder::new();
        for segment in &self.segments {
            match *segment {
                Segment::MoveTo(p) => pb.move_to(p.x, p.y),
                Segment::LineTo(p) => pb.line_to(p.x, p.y),
                Segment::QuadTo { ctrl, to } => pb.quad_to(ctrl.x, ctrl.y, to.x, to.y),
                Segment::CubicTo { ctrl1, ctrl2, to } => {
                    pb.cubic_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y)
                }
                Segment::Close => pb.close(),
            }
        }
        pb.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Path {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0))
            .quad_to(Point::new(5.0, -10.0), Point::new(10.0, 0.0))
            .line_to(Point::new(5.0, 5.0))
            .close();
        path
    }

    #[test]
    fn bounds_include_control_points() {
        let bounds = triangle().bounds().unwrap();
        assert_eq!(bounds, Rect::new(0.0, -10.0, 10.0, 15.0));
    }

    #[test]
    fn centroid_of_control_polygon() {
        let c = triangle().centroid();
        assert_eq!(c, Point::new(5.0, -1.25));
    }

    #[test]
    fn transform_mirrors_points() {
        let ts = tiny_skia::Transform::from_translate(100.0, 0.0).pre_scale(-1.0, 1.0);
        let mirrored = triangle().transformed(ts);
        let xs: Vec<f32> = mirrored.points().map(|p| p.x).collect();
        assert_eq!(xs, vec![100.0, 95.0, 90.0, 95.0]);
    }

    #[test]
    fn converts_to_skia() {
        assert!(triangle().to_skia().is_some());
        assert!(Path::new().to_skia().is_none());
    }
}

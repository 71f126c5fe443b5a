//! Per-frame anatomical reference frame.

use crate::config::RenderConfig;
use crate::error::Result;
use crate::geometry::{Point, SurfaceSize, centroid, project};
use crate::landmark::{Anchor, AnchorIndices, LandmarkSet};

/// Smallest head unit, in pixels. Keeps tiny or degenerate faces drawable.
pub const HEAD_UNIT_FLOOR: f32 = 80.0;

/// Fraction of `faceWidth + faceHeight` that makes up one head unit.
pub const HEAD_UNIT_FACTOR: f32 = 0.35;

/// The seven anchors projected into pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorPoints {
    pub left_temple: Point,
    pub right_temple: Point,
    pub forehead_top: Point,
    pub nose_bridge: Point,
    pub chin: Point,
    pub left_jaw: Point,
    pub right_jaw: Point,
}

impl AnchorPoints {
    pub fn get(&self, anchor: Anchor) -> Point {
        match anchor {
            Anchor::LeftTemple => self.left_temple,
            Anchor::RightTemple => self.right_temple,
            Anchor::ForeheadTop => self.forehead_top,
            Anchor::NoseBridge => self.nose_bridge,
            Anchor::Chin => self.chin,
            Anchor::LeftJaw => self.left_jaw,
            Anchor::RightJaw => self.right_jaw,
        }
    }

    /// Every anchor moved by `(dx, dy)`.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            left_temple: self.left_temple.offset(dx, dy),
            right_temple: self.right_temple.offset(dx, dy),
            forehead_top: self.forehead_top.offset(dx, dy),
            nose_bridge: self.nose_bridge.offset(dx, dy),
            chin: self.chin.offset(dx, dy),
            left_jaw: self.left_jaw.offset(dx, dy),
            right_jaw: self.right_jaw.offset(dx, dy),
        }
    }
}

/// Anchors, face measurements and the head unit for one frame.
///
/// Always in camera-natural (unmirrored) pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrame {
    /// Projected anchors, without the user offsets.
    pub anchors: AnchorPoints,
    pub face_width: f32,
    pub face_height: f32,
    pub head_unit: f32,
    /// Centroid of both temples and the forehead top, plus the user offsets.
    pub center: Point,
    /// User offsets the frame was built with.
    pub offset: Point,
}

impl ReferenceFrame {
    /// Builds the reference frame for one landmark set.
    ///
    /// Fails only when an anchor index lies outside the landmark set.
    pub fn build(
        landmarks: &LandmarkSet,
        indices: &AnchorIndices,
        size: SurfaceSize,
        config: &RenderConfig,
    ) -> Result<Self> {
        let point = |anchor| -> Result<Point> {
            Ok(project(indices.landmark(landmarks, anchor)?, size))
        };

        let anchors = AnchorPoints {
            left_temple: point(Anchor::LeftTemple)?,
            right_temple: point(Anchor::RightTemple)?,
            forehead_top: point(Anchor::ForeheadTop)?,
            nose_bridge: point(Anchor::NoseBridge)?,
            chin: point(Anchor::Chin)?,
            left_jaw: point(Anchor::LeftJaw)?,
            right_jaw: point(Anchor::RightJaw)?,
        };

        Ok(Self::from_anchors(anchors, config.offset_x, config.offset_y))
    }

    /// Derives measurements from already projected anchors.
    pub fn from_anchors(anchors: AnchorPoints, offset_x: f32, offset_y: f32) -> Self {
        let face_width = anchors.left_temple.distance(&anchors.right_temple);
        let face_height = anchors.forehead_top.distance(&anchors.chin);
        let head_unit = head_unit(face_width, face_height);
        let center = centroid(&[
            anchors.left_temple,
            anchors.right_temple,
            anchors.forehead_top,
        ])
        .offset(offset_x, offset_y);

        Self {
            anchors,
            face_width,
            face_height,
            head_unit,
            center,
            offset: Point::new(offset_x, offset_y),
        }
    }

    /// Anchors shifted by the user offsets, the space styles draw in.
    pub fn placed_anchors(&self) -> AnchorPoints {
        self.anchors.translated(self.offset.x, self.offset.y)
    }
}

/// `max(80, (faceWidth + faceHeight) * 0.35)`.
pub fn head_unit(face_width: f32, face_height: f32) -> f32 {
    ((face_width + face_height) * HEAD_UNIT_FACTOR).max(HEAD_UNIT_FLOOR)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::landmark::{FACE_MESH_LANDMARK_COUNT, Landmark};

    pub(crate) fn canonical_face() -> LandmarkSet {
        LandmarkSet::canonical(&AnchorIndices::FACE_MESH)
    }

    pub(crate) fn assert_close(actual: Point, expected: Point) {
        assert!(
            actual.distance(&expected) < 1e-3,
            "expected {expected:?}, got {actual:?}"
        );
    }

    pub(crate) const HD: SurfaceSize = SurfaceSize {
        width: 1280,
        height: 720,
    };

    #[test]
    fn canonical_face_measurements() {
        let frame = ReferenceFrame::build(
            &canonical_face(),
            &AnchorIndices::FACE_MESH,
            HD,
            &RenderConfig::default().with_offset(0.0, 0.0),
        )
        .unwrap();

        assert_close(frame.anchors.left_temple, Point::new(384.0, 360.0));
        assert_close(frame.anchors.right_temple, Point::new(896.0, 360.0));
        assert_close(frame.anchors.forehead_top, Point::new(640.0, 144.0));
        assert_close(frame.anchors.chin, Point::new(640.0, 576.0));
        assert!((frame.face_width - 512.0).abs() < 1e-3);
        assert!((frame.face_height - 432.0).abs() < 1e-3);
        assert!((frame.head_unit - 330.4).abs() < 1e-3);
        assert_close(frame.center, Point::new(640.0, 288.0));
    }

    #[test]
    fn center_carries_offsets() {
        let config = RenderConfig::default().with_offset(15.0, -20.0);
        let frame =
            ReferenceFrame::build(&canonical_face(), &AnchorIndices::FACE_MESH, HD, &config)
                .unwrap();
        assert_close(frame.center, Point::new(655.0, 268.0));
        // Stored anchors stay where the tracker put them.
        assert_close(frame.anchors.left_temple, Point::new(384.0, 360.0));
        assert_close(frame.placed_anchors().left_temple, Point::new(399.0, 340.0));
    }

    #[test]
    fn degenerate_face_floors_head_unit() {
        let anchors = AnchorIndices::FACE_MESH;
        let mut set = LandmarkSet::filled(FACE_MESH_LANDMARK_COUNT, Landmark::new(0.5, 0.5));
        anchors.place(&mut set, Anchor::LeftTemple, Landmark::new(0.4, 0.4));
        anchors.place(&mut set, Anchor::RightTemple, Landmark::new(0.4, 0.4));

        let frame =
            ReferenceFrame::build(&set, &anchors, HD, &RenderConfig::default()).unwrap();
        assert_eq!(frame.face_width, 0.0);
        assert_eq!(frame.face_height, 0.0);
        assert_eq!(frame.head_unit, 80.0);
        assert!(frame.center.is_finite());
    }

    #[test]
    fn build_is_deterministic() {
        let config = RenderConfig::default();
        let a = ReferenceFrame::build(&canonical_face(), &AnchorIndices::FACE_MESH, HD, &config);
        let b = ReferenceFrame::build(&canonical_face(), &AnchorIndices::FACE_MESH, HD, &config);
        assert_eq!(a.unwrap(), b.unwrap());
    }

    #[test]
    fn short_landmark_set_is_an_error() {
        let set = LandmarkSet::filled(100, Landmark::default());
        let result = ReferenceFrame::build(
            &set,
            &AnchorIndices::FACE_MESH,
            HD,
            &RenderConfig::default(),
        );
        assert!(result.is_err());
    }
}

//! Tracker-facing landmark types and the anchor index contract.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of points in the face-mesh topology the default anchors target.
pub const FACE_MESH_LANDMARK_COUNT: usize = 468;

/// A normalized facial keypoint (x, y in `[0, 1]`, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The ordered landmark points reported for one face in one frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: Vec<Landmark>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    /// A set of `len` copies of `fill`. Handy for synthetic faces.
    pub fn filled(len: usize, fill: Landmark) -> Self {
        Self {
            points: vec![fill; len],
        }
    }

    /// A symmetric frontal face for demos and previews: temples at
    /// (0.3, 0.5) and (0.7, 0.5), forehead top at (0.5, 0.2), chin at
    /// (0.5, 0.8) and every other point at the image center.
    pub fn canonical(indices: &AnchorIndices) -> Self {
        let mut set = Self::filled(
            FACE_MESH_LANDMARK_COUNT.max(indices.required_len()),
            Landmark::new(0.5, 0.5),
        );
        indices.place(&mut set, Anchor::LeftTemple, Landmark::new(0.3, 0.5));
        indices.place(&mut set, Anchor::RightTemple, Landmark::new(0.7, 0.5));
        indices.place(&mut set, Anchor::ForeheadTop, Landmark::new(0.5, 0.2));
        indices.place(&mut set, Anchor::Chin, Landmark::new(0.5, 0.8));
        set
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Landmark> {
        self.points.get(index).copied()
    }

    /// Overwrites the point at `index`, growing the set if needed.
    pub fn set(&mut self, index: usize, landmark: Landmark) {
        if index >= self.points.len() {
            self.points.resize(index + 1, Landmark::default());
        }
        self.points[index] = landmark;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Landmark] {
        &self.points
    }
}

impl From<Vec<Landmark>> for LandmarkSet {
    fn from(points: Vec<Landmark>) -> Self {
        Self::new(points)
    }
}

/// The seven semantic anchors every renderer is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    LeftTemple,
    RightTemple,
    ForeheadTop,
    NoseBridge,
    Chin,
    LeftJaw,
    RightJaw,
}

impl Anchor {
    pub const ALL: [Anchor; 7] = [
        Anchor::LeftTemple,
        Anchor::RightTemple,
        Anchor::ForeheadTop,
        Anchor::NoseBridge,
        Anchor::Chin,
        Anchor::LeftJaw,
        Anchor::RightJaw,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Anchor::LeftTemple => "leftTemple",
            Anchor::RightTemple => "rightTemple",
            Anchor::ForeheadTop => "foreheadTop",
            Anchor::NoseBridge => "noseBridge",
            Anchor::Chin => "chin",
            Anchor::LeftJaw => "leftJaw",
            Anchor::RightJaw => "rightJaw",
        }
    }
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Positions of the anchors inside the tracker's landmark set.
///
/// This is a contract with the tracker model, not something derivable from
/// geometry: swapping trackers means supplying a new mapping. Indices are only
/// bounds-checked; a wrong but in-range index silently produces wrong shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct AnchorIndices {
    pub left_temple: usize,
    pub right_temple: usize,
    pub forehead_top: usize,
    pub nose_bridge: usize,
    pub chin: usize,
    pub left_jaw: usize,
    pub right_jaw: usize,
}

impl AnchorIndices {
    /// Anchors for the 468-point face-mesh topology.
    pub const FACE_MESH: Self = Self {
        left_temple: 127,
        right_temple: 356,
        forehead_top: 10,
        nose_bridge: 6,
        chin: 152,
        left_jaw: 234,
        right_jaw: 454,
    };

    pub fn index_of(&self, anchor: Anchor) -> usize {
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

    /// Smallest landmark set length that satisfies every index.
    pub fn required_len(&self) -> usize {
        Anchor::ALL
            .iter()
            .map(|a| self.index_of(*a))
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Looks up one anchor's landmark.
    pub fn landmark(&self, set: &LandmarkSet, anchor: Anchor) -> Result<Landmark> {
        let index = self.index_of(anchor);
        set.get(index).ok_or(Error::LandmarkOutOfRange {
            anchor,
            index,
            len: set.len(),
        })
    }

    /// Writes `landmark` at the anchor's position in `set`.
    pub fn place(&self, set: &mut LandmarkSet, anchor: Anchor, landmark: Landmark) {
        set.set(self.index_of(anchor), landmark);
    }
}

impl Default for AnchorIndices {
    fn default() -> Self {
        Self::FACE_MESH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_mesh_indices_fit_topology() {
        assert_eq!(AnchorIndices::FACE_MESH.required_len(), 455);
        assert!(AnchorIndices::FACE_MESH.required_len() <= FACE_MESH_LANDMARK_COUNT);
    }

    #[test]
    fn place_and_lookup() {
        let anchors = AnchorIndices::FACE_MESH;
        let mut set = LandmarkSet::filled(FACE_MESH_LANDMARK_COUNT, Landmark::new(0.5, 0.5));
        anchors.place(&mut set, Anchor::Chin, Landmark::new(0.5, 0.8));

        assert_eq!(set.get(152), Some(Landmark::new(0.5, 0.8)));
        assert_eq!(
            anchors.landmark(&set, Anchor::Chin).unwrap(),
            Landmark::new(0.5, 0.8)
        );
        assert_eq!(set.len(), FACE_MESH_LANDMARK_COUNT);
    }

    #[test]
    fn short_set_reports_out_of_range() {
        let set = LandmarkSet::filled(20, Landmark::default());
        let err = AnchorIndices::FACE_MESH
            .landmark(&set, Anchor::LeftTemple)
            .unwrap_err();
        match err {
            Error::LandmarkOutOfRange { anchor, index, len } => {
                assert_eq!(anchor, Anchor::LeftTemple);
                assert_eq!(index, 127);
                assert_eq!(len, 20);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn landmark_set_json_is_a_plain_array() {
        let set = LandmarkSet::new(vec![Landmark::new(0.1, 0.2), Landmark::new(0.3, 0.4)]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"[{"x":0.1,"y":0.2},{"x":0.3,"y":0.4}]"#);
        let restored: LandmarkSet = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, set);
    }
}

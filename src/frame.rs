//! Per-frame driver.
//!
//! Each tracker result goes through the same sequence:
//!
//! ```text
//! Idle -> Cleared -> Mirrored -> Rendered | Skipped -> Restored -> Idle
//! ```
//!
//! The surface is always cleared, and the mirror transform is always undone,
//! whether or not a face was found.

use tracing::{debug, trace, warn};

use crate::asset::{self, AssetBitmap};
use crate::config::{HairStyle, RenderConfig};
use crate::landmark::{AnchorIndices, LandmarkSet};
use crate::mirror::MirrorGuard;
use crate::reference::ReferenceFrame;
use crate::style;
use crate::surface::Surface;

/// Whether the last frame had a face to draw on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingStatus {
    Tracking,
    #[default]
    NoFace,
}

impl TrackingStatus {
    /// Short status line for a UI.
    pub fn label(&self) -> &'static str {
        match self {
            TrackingStatus::Tracking => "Tracking",
            TrackingStatus::NoFace => "No face detected",
        }
    }

    /// Guidance to show alongside the label, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            TrackingStatus::Tracking => None,
            TrackingStatus::NoFace => Some("Move into frame and face the camera."),
        }
    }
}

impl std::fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Stages of one frame, as they appear in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    Idle,
    Cleared,
    Mirrored,
    Rendered,
    Skipped,
    Restored,
}

/// What was drawn for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    Style(HairStyle),
    Asset,
    Skipped,
}

/// Outcome of [`FrameOrchestrator::render_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub status: TrackingStatus,
    pub path: RenderPath,
    /// The landmarks came from an earlier frame.
    pub reused_landmarks: bool,
}

impl FrameReport {
    fn skipped() -> Self {
        Self {
            status: TrackingStatus::NoFace,
            path: RenderPath::Skipped,
            reused_landmarks: false,
        }
    }
}

/// Drives rendering once per tracker result.
#[derive(Debug, Clone, Default)]
pub struct FrameOrchestrator {
    indices: AnchorIndices,
    hold_frames: u32,
    last_seen: Option<LandmarkSet>,
    missed: u32,
    status: TrackingStatus,
}

impl FrameOrchestrator {
    pub fn new(indices: AnchorIndices) -> Self {
        Self {
            indices,
            ..Self::default()
        }
    }

    /// Keep drawing on the last seen landmarks for up to `frames` frames
    /// without a face. Zero (the default) disables the hold.
    pub fn with_hold_frames(mut self, frames: u32) -> Self {
        self.hold_frames = frames;
        self
    }

    pub fn indices(&self) -> &AnchorIndices {
        &self.indices
    }

    pub fn set_indices(&mut self, indices: AnchorIndices) {
        self.indices = indices;
    }

    pub fn hold_frames(&self) -> u32 {
        self.hold_frames
    }

    /// Status of the most recent frame.
    pub fn status(&self) -> TrackingStatus {
        self.status
    }

    /// Forgets held landmarks.
    pub fn reset(&mut self) {
        self.last_seen = None;
        self.missed = 0;
        self.status = TrackingStatus::NoFace;
    }

    /// Renders one frame onto `surface`.
    ///
    /// Draws the asset when `config.use_asset` is set and an asset is
    /// available, otherwise the configured style.
    pub fn render_frame<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        landmarks: Option<&LandmarkSet>,
        config: &RenderConfig,
        asset: Option<&AssetBitmap>,
    ) -> FrameReport {
        surface.clear();
        trace!(phase = ?FramePhase::Cleared);

        let mut guard = MirrorGuard::begin(surface, config.mirror);
        trace!(phase = ?FramePhase::Mirrored, mirrored = guard.is_mirrored());

        let report = self.dispatch(&mut *guard, landmarks, config, asset);

        guard.end();
        trace!(phase = ?FramePhase::Restored);

        self.status = report.status;
        debug!(status = %report.status, path = ?report.path, reused = report.reused_landmarks, "frame done");
        report
    }

    fn dispatch<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        landmarks: Option<&LandmarkSet>,
        config: &RenderConfig,
        asset: Option<&AssetBitmap>,
    ) -> FrameReport {
        let reused_landmarks = landmarks.is_none();
        if let Some(set) = landmarks {
            self.missed = 0;
            if self.hold_frames > 0 {
                self.last_seen = Some(set.clone());
            }
        } else if self.last_seen.is_some() && self.missed < self.hold_frames {
            self.missed += 1;
        } else {
            self.last_seen = None;
        }

        let Some(set) = landmarks.or(self.last_seen.as_ref()) else {
            trace!(phase = ?FramePhase::Skipped, "no face");
            return FrameReport::skipped();
        };

        let frame = match ReferenceFrame::build(set, &self.indices, surface.size(), config) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(%err, "landmark set does not cover the anchors");
                trace!(phase = ?FramePhase::Skipped);
                return FrameReport::skipped();
            }
        };

        let path = match asset {
            Some(bitmap) if config.use_asset => {
                asset::render(&frame, config, Some(bitmap), surface);
                RenderPath::Asset
            }
            _ => {
                if config.use_asset {
                    debug!("no asset available, drawing the style instead");
                }
                style::render(&frame, config, surface);
                RenderPath::Style(config.style)
            }
        };
        trace!(phase = ?FramePhase::Rendered, ?path);

        FrameReport {
            status: TrackingStatus::Tracking,
            path,
            reused_landmarks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, SurfaceSize};
    use crate::landmark::Landmark;
    use crate::reference::tests::{HD, canonical_face};
    use crate::surface::{DrawCommand, PixmapSurface, RecordingSurface};
    use image::{Rgba, RgbaImage};

    fn asset() -> AssetBitmap {
        AssetBitmap::from_rgba_image(&RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255]))).unwrap()
    }

    #[test]
    fn no_face_clears_and_restores() {
        let mut orchestrator = FrameOrchestrator::default();
        let mut surface = RecordingSurface::new(HD);

        let report = orchestrator.render_frame(&mut surface, None, &RenderConfig::default(), None);
        assert_eq!(report, FrameReport::skipped());
        assert_eq!(orchestrator.status(), TrackingStatus::NoFace);
        assert_eq!(surface.commands(), &[DrawCommand::Clear]);
        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.max_depth(), 1);
    }

    #[test]
    fn no_face_frames_are_idempotent() {
        let mut orchestrator = FrameOrchestrator::default();
        let config = RenderConfig::new(HairStyle::Long);
        let mut surface = RecordingSurface::new(HD);

        orchestrator.render_frame(&mut surface, Some(&canonical_face()), &config, None);
        assert!(surface.visible().len() > 1);

        orchestrator.render_frame(&mut surface, None, &config, None);
        let once = surface.visible().to_vec();
        orchestrator.render_frame(&mut surface, None, &config, None);
        assert_eq!(surface.visible(), once.as_slice());
        assert!(once.is_empty());
    }

    #[test]
    fn raster_frames_are_deterministic_and_clear_fully() {
        let size = SurfaceSize::new(640, 360);
        let face = canonical_face();
        let render = |config: &RenderConfig, asset: Option<&AssetBitmap>| {
            let mut surface = PixmapSurface::new(size).unwrap();
            let report =
                FrameOrchestrator::default().render_frame(&mut surface, Some(&face), config, asset);
            (surface, report)
        };

        let bitmap = asset();
        for mirror in [false, true] {
            for style in HairStyle::ALL {
                let config = RenderConfig::new(style).with_mirror(mirror);
                let (a, _) = render(&config, None);
                let (b, _) = render(&config, None);
                assert!(a.pixmap().data() == b.pixmap().data(), "{style} mirror={mirror}");
                let drawn = a.pixmap().pixels().iter().any(|p| p.alpha() > 0);
                assert_eq!(drawn, style != HairStyle::None, "{style}");
            }

            let config = RenderConfig::default().with_use_asset(true).with_mirror(mirror);
            let (a, report) = render(&config, Some(&bitmap));
            let (b, _) = render(&config, Some(&bitmap));
            assert_eq!(report.path, RenderPath::Asset);
            assert!(a.pixmap().data() == b.pixmap().data(), "asset mirror={mirror}");
        }

        let mut orchestrator = FrameOrchestrator::default();
        let mut surface = PixmapSurface::new(size).unwrap();
        let config = RenderConfig::new(HairStyle::Long);
        orchestrator.render_frame(&mut surface, Some(&face), &config, None);
        assert!(surface.pixmap().pixels().iter().any(|p| p.alpha() > 0));

        for _ in 0..2 {
            let report = orchestrator.render_frame(&mut surface, None, &config, None);
            assert_eq!(report.status, TrackingStatus::NoFace);
            assert!(surface.pixmap().pixels().iter().all(|p| p.alpha() == 0));
            assert_eq!(surface.save_depth(), 0);
        }
    }

    #[test]
    fn tracking_draws_style_with_balanced_stack() {
        let mut orchestrator = FrameOrchestrator::default();
        let config = RenderConfig::new(HairStyle::Fringe);
        let mut surface = RecordingSurface::new(HD);

        let report = orchestrator.render_frame(&mut surface, Some(&canonical_face()), &config, None);
        assert_eq!(report.status, TrackingStatus::Tracking);
        assert_eq!(report.path, RenderPath::Style(HairStyle::Fringe));
        assert!(!report.reused_landmarks);
        assert_eq!(surface.commands()[0], DrawCommand::Clear);
        assert_eq!(surface.visible().len(), 1 + crate::style::FRINGE_SPIKES);
        assert_eq!(surface.depth(), 0);
        assert!(surface.transform().is_identity());
    }

    #[test]
    fn mirrored_frame_is_reflected_about_the_centerline() {
        let mut orchestrator = FrameOrchestrator::default();
        let face = canonical_face();
        let config = RenderConfig::new(HairStyle::Pompadour).with_offset(20.0, 10.0);

        let mut plain = RecordingSurface::new(HD);
        orchestrator.render_frame(&mut plain, Some(&face), &config.with_mirror(false), None);
        let mut mirrored = RecordingSurface::new(HD);
        orchestrator.render_frame(&mut mirrored, Some(&face), &config.with_mirror(true), None);

        assert_eq!(plain.commands().len(), mirrored.commands().len());
        for (a, b) in plain.commands().iter().zip(mirrored.commands()) {
            let (Some(a), Some(b)) = (a.path(), b.path()) else {
                continue;
            };
            for (p, q) in a.points().zip(b.points()) {
                let reflected = Point::new(1280.0 - p.x, p.y);
                assert!(reflected.distance(&q) < 1e-3, "{p:?} vs {q:?}");
            }
        }
    }

    #[test]
    fn asset_mode_falls_back_to_style_without_an_asset() {
        let mut orchestrator = FrameOrchestrator::default();
        let config = RenderConfig::new(HairStyle::Buzz).with_use_asset(true);
        let face = canonical_face();
        let mut surface = RecordingSurface::new(HD);

        let report = orchestrator.render_frame(&mut surface, Some(&face), &config, None);
        assert_eq!(report.path, RenderPath::Style(HairStyle::Buzz));

        let report = orchestrator.render_frame(&mut surface, Some(&face), &config, Some(&asset()));
        assert_eq!(report.path, RenderPath::Asset);
        assert!(matches!(surface.visible(), [DrawCommand::Image { .. }]));

        // An asset alone does not switch modes.
        let report =
            orchestrator.render_frame(&mut surface, Some(&face), &config.with_use_asset(false), Some(&asset()));
        assert_eq!(report.path, RenderPath::Style(HairStyle::Buzz));
    }

    #[test]
    fn short_landmark_set_reports_no_face() {
        let mut orchestrator = FrameOrchestrator::default();
        let mut surface = RecordingSurface::new(HD);
        let short = LandmarkSet::filled(12, Landmark::new(0.5, 0.5));

        let report = orchestrator.render_frame(&mut surface, Some(&short), &RenderConfig::default(), None);
        assert_eq!(report.status, TrackingStatus::NoFace);
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn hold_bridges_short_dropouts() {
        let mut orchestrator = FrameOrchestrator::default().with_hold_frames(2);
        let config = RenderConfig::default();
        let mut surface = RecordingSurface::new(HD);

        orchestrator.render_frame(&mut surface, Some(&canonical_face()), &config, None);
        let first = surface.visible().to_vec();

        for _ in 0..2 {
            let report = orchestrator.render_frame(&mut surface, None, &config, None);
            assert_eq!(report.status, TrackingStatus::Tracking);
            assert!(report.reused_landmarks);
            assert_eq!(surface.visible(), first.as_slice());
        }

        let report = orchestrator.render_frame(&mut surface, None, &config, None);
        assert_eq!(report.status, TrackingStatus::NoFace);

        // Without a hold, a dropout is a dropout.
        let mut orchestrator = FrameOrchestrator::default();
        orchestrator.render_frame(&mut surface, Some(&canonical_face()), &config, None);
        let report = orchestrator.render_frame(&mut surface, None, &config, None);
        assert_eq!(report.status, TrackingStatus::NoFace);
    }

    #[test]
    fn status_labels() {
        assert_eq!(TrackingStatus::Tracking.to_string(), "Tracking");
        assert_eq!(TrackingStatus::NoFace.label(), "No face detected");
        assert!(TrackingStatus::NoFace.hint().is_some());
        assert!(TrackingStatus::Tracking.hint().is_none());
    }
}

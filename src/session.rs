//! High-level overlay session.

use tracing::{debug, info, warn};

use crate::asset::{AssetBitmap, AssetLoader, AssetSource};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::frame::{FrameOrchestrator, FrameReport, TrackingStatus};
use crate::landmark::{AnchorIndices, LandmarkSet};
use crate::profile::OverlayProfile;
use crate::surface::Surface;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from an [`OverlayProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    fn apply_profile(&mut self, profile: &OverlayProfile);

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> OverlayProfile;
}

// ============================================================================
// OverlaySession
// ============================================================================

/// Everything a live preview needs between frames.
///
/// Holds the current [`RenderConfig`], the loaded asset and the frame
/// orchestrator. Settings change between frames; each call to
/// [`render_frame`](Self::render_frame) reads one consistent snapshot.
///
/// # Example
///
/// ```
/// use hairline_renderer::{
///     HairStyle, LandmarkSet, OverlaySession, RecordingSurface, RenderConfig, SurfaceSize,
///     TrackingStatus,
/// };
///
/// let mut session = OverlaySession::new(RenderConfig::new(HairStyle::Buzz));
/// let mut surface = RecordingSurface::new(SurfaceSize::new(640, 480));
///
/// let face = LandmarkSet::canonical(session.indices());
/// let report = session.render_frame(&mut surface, Some(&face));
/// assert_eq!(report.status, TrackingStatus::Tracking);
///
/// session.render_frame(&mut surface, None);
/// assert_eq!(session.status(), TrackingStatus::NoFace);
/// ```
#[derive(Debug, Default)]
pub struct OverlaySession {
    orchestrator: FrameOrchestrator,
    config: RenderConfig,
    asset: Option<AssetBitmap>,
    pending: Option<AssetLoader>,
}

impl OverlaySession {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replaces the orchestrator, e.g. to enable a landmark hold.
    pub fn with_orchestrator(mut self, orchestrator: FrameOrchestrator) -> Self {
        self.orchestrator = orchestrator;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    /// Edits the configuration in place.
    pub fn update(&mut self, f: impl FnOnce(RenderConfig) -> RenderConfig) {
        self.config = f(self.config);
    }

    pub fn indices(&self) -> &AnchorIndices {
        self.orchestrator.indices()
    }

    pub fn status(&self) -> TrackingStatus {
        self.orchestrator.status()
    }

    pub fn asset(&self) -> Option<&AssetBitmap> {
        self.asset.as_ref()
    }

    /// Installs an asset and switches to asset mode.
    pub fn set_asset(&mut self, asset: AssetBitmap) {
        debug!(?asset, "asset installed");
        self.asset = Some(asset);
        self.config.use_asset = true;
    }

    /// Drops the asset. The mode flag is left alone, so frames fall back to
    /// the procedural style.
    pub fn clear_asset(&mut self) {
        self.asset = None;
        self.pending = None;
    }

    /// Decodes an asset on the calling thread and installs it.
    pub fn load_asset(&mut self, source: AssetSource) -> Result<()> {
        let asset = source.load()?;
        self.set_asset(asset);
        Ok(())
    }

    /// Starts decoding an asset on a background thread. Any load already in
    /// flight is abandoned.
    pub fn load_asset_in_background(&mut self, source: AssetSource) {
        if let Some(previous) = self.pending.replace(AssetLoader::spawn(source)) {
            info!(source = previous.source(), "abandoning pending asset load");
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Installs a finished background load. Returns `Some` once per load,
    /// with the error if decoding failed.
    pub fn poll_asset(&mut self) -> Option<Result<()>> {
        let result = self.pending.as_ref()?.poll()?;
        self.pending = None;
        Some(match result {
            Ok(asset) => {
                self.set_asset(asset);
                Ok(())
            }
            Err(err) => {
                warn!(%err, "background asset load failed");
                Err(err)
            }
        })
    }

    /// Renders one frame with the current settings.
    pub fn render_frame<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        landmarks: Option<&LandmarkSet>,
    ) -> FrameReport {
        self.orchestrator
            .render_frame(surface, landmarks, &self.config, self.asset.as_ref())
    }
}

impl Configurable for OverlaySession {
    fn apply_profile(&mut self, profile: &OverlayProfile) {
        self.config = profile.to_config();
        if let Some(anchors) = profile.anchors {
            self.orchestrator.set_indices(anchors);
        }
    }

    fn export_profile(&self) -> OverlayProfile {
        let mut profile = OverlayProfile::from(&self.config);
        if *self.orchestrator.indices() != AnchorIndices::FACE_MESH {
            profile.anchors = Some(*self.orchestrator.indices());
        }
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HairStyle;
    use crate::frame::RenderPath;
    use crate::reference::tests::{HD, canonical_face};
    use crate::surface::RecordingSurface;
    use image::{Rgba, RgbaImage};

    fn png_bytes() -> Vec<u8> {
        let mut png = Vec::new();
        RgbaImage::from_pixel(3, 3, Rgba([50, 40, 30, 255]))
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        png
    }

    #[test]
    fn profile_apply_and_export() {
        let profile = OverlayProfile::from_json(
            r#"{ "style": "long", "opacity": 0.5, "mirror": false, "offsetY": -20 }"#,
        )
        .unwrap();

        let mut session = OverlaySession::default();
        session.apply_profile(&profile);
        assert_eq!(session.config().style, HairStyle::Long);
        assert_eq!(session.config().opacity, 0.5);
        assert!(!session.config().mirror);
        assert_eq!(session.config().offset_y, -20.0);

        let exported = session.export_profile();
        assert_eq!(exported, profile);
        assert!(exported.anchors.is_none());
    }

    #[test]
    fn custom_anchors_survive_export() {
        let custom = AnchorIndices {
            chin: 200,
            ..AnchorIndices::FACE_MESH
        };
        let mut session = OverlaySession::default();
        session.apply_profile(&OverlayProfile::new().with_anchors(custom));
        assert_eq!(*session.indices(), custom);
        assert_eq!(session.export_profile().anchors, Some(custom));
    }

    #[test]
    fn update_edits_between_frames() {
        let mut session = OverlaySession::new(RenderConfig::new(HairStyle::Fade));
        session.update(|c| c.with_style(HairStyle::Buzz).with_scale(9.0));
        assert_eq!(session.config().style, HairStyle::Buzz);
        assert_eq!(session.config().scale, 3.0);
    }

    #[test]
    fn inline_asset_load_switches_mode() {
        let mut session = OverlaySession::default();
        session.load_asset(AssetSource::Bytes(png_bytes())).unwrap();
        assert!(session.config().use_asset);

        let mut surface = RecordingSurface::new(HD);
        let report = session.render_frame(&mut surface, Some(&canonical_face()));
        assert_eq!(report.path, RenderPath::Asset);

        session.clear_asset();
        let report = session.render_frame(&mut surface, Some(&canonical_face()));
        assert_eq!(report.path, RenderPath::Style(HairStyle::Fade));
    }

    #[test]
    fn background_asset_load() {
        let mut session = OverlaySession::default();
        session.load_asset_in_background(AssetSource::Bytes(png_bytes()));
        assert!(session.is_loading());

        let result = loop {
            if let Some(result) = session.poll_asset() {
                break result;
            }
            std::thread::yield_now();
        };
        assert!(result.is_ok());
        assert!(!session.is_loading());
        assert_eq!(session.asset().unwrap().width(), 3);
        assert!(session.poll_asset().is_none());
    }

    #[test]
    fn failed_background_load_keeps_style() {
        let mut session = OverlaySession::default();
        session.load_asset_in_background(AssetSource::Bytes(b"garbage".to_vec()));
        let result = loop {
            if let Some(result) = session.poll_asset() {
                break result;
            }
            std::thread::yield_now();
        };
        assert!(result.is_err());
        assert!(session.asset().is_none());
        assert!(!session.config().use_asset);
    }
}

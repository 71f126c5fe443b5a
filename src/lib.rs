//! hairline-renderer: landmark-anchored hairstyle overlays
//!
//! This crate turns the facial landmarks a face tracker reports for a video
//! frame into a layered hairstyle drawing, anchored to the temples, forehead
//! and jaw and scaled by a per-frame "head unit".
//!
//! # Example
//!
//! ```
//! use hairline_renderer::{
//!     FrameOrchestrator, HairStyle, LandmarkSet, PixmapSurface, RenderConfig, SurfaceSize,
//!     TrackingStatus,
//! };
//!
//! let mut surface = PixmapSurface::new(SurfaceSize::new(320, 240)).unwrap();
//! let mut orchestrator = FrameOrchestrator::default();
//! let config = RenderConfig::new(HairStyle::Pompadour).with_opacity(0.9);
//!
//! // One tracker result per frame; `None` when no face was found.
//! let face = LandmarkSet::canonical(orchestrator.indices());
//! let report = orchestrator.render_frame(&mut surface, Some(&face), &config, None);
//! assert_eq!(report.status, TrackingStatus::Tracking);
//!
//! let overlay = surface.to_rgba_image();
//! assert!(overlay.pixels().any(|p| p[3] > 0));
//! ```
//!
//! # Building blocks
//!
//! The orchestrator is a thin driver over pieces that can be used alone:
//!
//! ```
//! use hairline_renderer::{
//!     AnchorIndices, HairStyle, LandmarkSet, ReferenceFrame, RenderConfig, SurfaceSize,
//! };
//!
//! let config = RenderConfig::new(HairStyle::Fringe).with_offset(0.0, 0.0);
//! let face = LandmarkSet::canonical(&AnchorIndices::FACE_MESH);
//! let frame = ReferenceFrame::build(
//!     &face,
//!     &AnchorIndices::FACE_MESH,
//!     SurfaceSize::new(1280, 720),
//!     &config,
//! )
//! .unwrap();
//! assert!(frame.head_unit >= 80.0);
//!
//! let scene = config.style.scene(&frame, &config);
//! assert_eq!(scene.details().count(), hairline_renderer::style::FRINGE_SPIKES);
//! ```

pub mod asset;
mod color;
mod config;
mod error;
mod frame;
mod geometry;
mod landmark;
mod mirror;
mod path;
mod profile;
mod reference;
mod scene;
mod session;
pub mod style;
pub mod surface;

pub use asset::{AssetBitmap, AssetLoader, AssetSource};
pub use color::HairColor;
pub use config::{HairStyle, OFFSET_RANGE, RenderConfig, SCALE_RANGE};
pub use error::{Error, Result};
pub use frame::{FrameOrchestrator, FramePhase, FrameReport, RenderPath, TrackingStatus};
pub use geometry::{Point, Rect, SurfaceSize, centroid, project};
pub use landmark::{Anchor, AnchorIndices, FACE_MESH_LANDMARK_COUNT, Landmark, LandmarkSet};
pub use mirror::{MirrorGuard, with_mirror};
pub use path::{Path, Segment};
pub use profile::OverlayProfile;
pub use reference::{AnchorPoints, HEAD_UNIT_FACTOR, HEAD_UNIT_FLOOR, ReferenceFrame, head_unit};
pub use scene::{DropShadow, GradientStop, Paint, Scene, Shape, ShapeKind, ShapeRole};
pub use session::{Configurable, OverlaySession};
pub use surface::{DrawCommand, PixmapSurface, RecordingSurface, Surface};

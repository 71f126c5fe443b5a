//! Serializable overlay profile.
//!
//! An [`OverlayProfile`] captures every user setting in a JSON-friendly form,
//! so a UI process can hand settings to a renderer process or persist them.
//!
//! # Example
//!
//! ```
//! use hairline_renderer::{HairStyle, OverlayProfile};
//!
//! let profile = OverlayProfile::from_json(r#"{ "style": "fringe", "opacity": 0.6 }"#).unwrap();
//! assert_eq!(profile.style, HairStyle::Fringe);
//!
//! let config = profile.to_config();
//! assert_eq!(config.opacity, 0.6);
//! assert!(config.mirror);
//! ```

use serde::{Deserialize, Serialize};

use crate::color::HairColor;
use crate::config::{HairStyle, RenderConfig};
use crate::landmark::AnchorIndices;

// ============================================================================
// OverlayProfile
// ============================================================================

/// A serializable snapshot of the overlay settings.
///
/// Missing fields take the [`RenderConfig`] defaults.
///
/// # JSON Format
///
/// ```json
/// {
///   "style": "pompadour",
///   "color": "#3b2a1f",
///   "opacity": 0.85,
///   "scale": 1.0,
///   "offsetX": 0.0,
///   "offsetY": -12.0,
///   "mirror": true,
///   "useAsset": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct OverlayProfile {
    pub style: HairStyle,

    /// `#rrggbb` or `#rgb`.
    pub color: HairColor,

    /// Overlay opacity (0.0-1.0).
    pub opacity: f32,

    /// Size multiplier (0.25-3.0).
    pub scale: f32,

    /// Horizontal nudge in pixels (-400 to 400).
    pub offset_x: f32,

    /// Vertical nudge in pixels (-400 to 400).
    pub offset_y: f32,

    pub mirror: bool,

    pub use_asset: bool,

    /// Custom landmark indices for a non face-mesh tracker. `None` keeps the
    /// current mapping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchors: Option<AnchorIndices>,
}

impl Default for OverlayProfile {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for OverlayProfile {
    fn from(config: &RenderConfig) -> Self {
        Self {
            style: config.style,
            color: config.color,
            opacity: config.opacity,
            scale: config.scale,
            offset_x: config.offset_x,
            offset_y: config.offset_y,
            mirror: config.mirror,
            use_asset: config.use_asset,
            anchors: None,
        }
    }
}

impl OverlayProfile {
    /// Creates a profile with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchors(mut self, anchors: AnchorIndices) -> Self {
        self.anchors = Some(anchors);
        self
    }

    /// Converts to a render configuration, clamping every value to its
    /// control range.
    pub fn to_config(&self) -> RenderConfig {
        RenderConfig::new(self.style)
            .with_color(self.color)
            .with_opacity(self.opacity)
            .with_scale(self.scale)
            .with_offset(self.offset_x, self.offset_y)
            .with_mirror(self.mirror)
            .with_use_asset(self.use_asset)
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serialization_roundtrip() {
        let config = RenderConfig::new(HairStyle::Long)
            .with_color(HairColor::new(0xaa, 0x55, 0x11))
            .with_opacity(0.4)
            .with_offset(12.0, -30.0)
            .with_mirror(false);
        let profile = OverlayProfile::from(&config).with_anchors(AnchorIndices::FACE_MESH);

        let json = profile.to_json().unwrap();
        let restored = OverlayProfile::from_json(&json).unwrap();

        assert_eq!(restored, profile);
        assert_eq!(restored.to_config(), config);
    }

    #[test]
    fn profile_json_format() {
        let json = OverlayProfile::new().to_json_pretty().unwrap();

        assert!(json.contains("\"style\": \"fade\""));
        assert!(json.contains("\"color\": \"#3b2a1f\""));
        assert!(json.contains("\"offsetX\""));
        assert!(json.contains("\"useAsset\""));
        assert!(!json.contains("\"anchors\""));
    }

    #[test]
    fn empty_profile_deserializes() {
        let profile = OverlayProfile::from_json("{}").unwrap();
        assert_eq!(profile, OverlayProfile::default());
        assert_eq!(profile.to_config(), RenderConfig::default());
    }

    #[test]
    fn unknown_style_becomes_none() {
        let profile = OverlayProfile::from_json(r#"{ "style": "mohawk" }"#).unwrap();
        assert_eq!(profile.style, HairStyle::None);
    }

    #[test]
    fn out_of_range_values_are_clamped_on_conversion() {
        let profile = OverlayProfile::from_json(
            r#"{ "opacity": 4.0, "scale": 0.01, "offsetX": 900, "offsetY": -900 }"#,
        )
        .unwrap();
        let config = profile.to_config();
        assert_eq!(config.opacity, 1.0);
        assert_eq!(config.scale, 0.25);
        assert_eq!((config.offset_x, config.offset_y), (400.0, -400.0));
    }

    #[test]
    fn bad_color_is_rejected() {
        let err = OverlayProfile::from_json(r#"{ "color": "blond" }"#).unwrap_err();
        assert!(err.to_string().contains("blond"));
    }

    #[test]
    fn custom_anchors() {
        let profile = OverlayProfile::from_json(
            r#"{ "anchors": { "leftTemple": 0, "rightTemple": 1, "foreheadTop": 2,
                 "noseBridge": 3, "chin": 4, "leftJaw": 5, "rightJaw": 6 } }"#,
        )
        .unwrap();
        assert_eq!(profile.anchors.unwrap().required_len(), 7);
    }
}

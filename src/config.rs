//! Render configuration.
//!
//! [`RenderConfig`] is an immutable value snapshot. The renderers read it but
//! never clamp it: the constructors and `with_*` builders here stand in for the
//! bounded UI controls and are the only place values get clamped.

use serde::{Deserialize, Serialize};

use crate::color::HairColor;

/// Accepted range for [`RenderConfig::scale`] when set through the builders.
pub const SCALE_RANGE: std::ops::RangeInclusive<f32> = 0.25..=3.0;

/// Accepted range for the pixel offsets when set through the builders.
pub const OFFSET_RANGE: std::ops::RangeInclusive<f32> = -400.0..=400.0;

// ============================================================================
// HairStyle
// ============================================================================

/// The procedural hairstyle variants.
///
/// Unknown names parse and deserialize as [`HairStyle::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum HairStyle {
    Buzz,
    Fade,
    Fringe,
    Pompadour,
    Long,
    // `other` must be the last variant.
    #[default]
    #[serde(other)]
    None,
}

impl HairStyle {
    pub const ALL: [HairStyle; 6] = [
        HairStyle::None,
        HairStyle::Buzz,
        HairStyle::Fade,
        HairStyle::Fringe,
        HairStyle::Pompadour,
        HairStyle::Long,
    ];

    /// Parses a style name, falling back to `None` for anything unrecognized.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "buzz" => HairStyle::Buzz,
            "fade" => HairStyle::Fade,
            "fringe" => HairStyle::Fringe,
            "pompadour" => HairStyle::Pompadour,
            "long" => HairStyle::Long,
            _ => HairStyle::None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HairStyle::None => "none",
            HairStyle::Buzz => "buzz",
            HairStyle::Fade => "fade",
            HairStyle::Fringe => "fringe",
            HairStyle::Pompadour => "pompadour",
            HairStyle::Long => "long",
        }
    }
}

impl std::fmt::Display for HairStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// RenderConfig
// ============================================================================

/// User style and transform settings for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub style: HairStyle,
    pub color: HairColor,
    /// Overlay opacity, 0.0-1.0.
    pub opacity: f32,
    /// Size multiplier, 1.0 = 100%.
    pub scale: f32,
    /// Horizontal nudge in pixels (camera-natural space).
    pub offset_x: f32,
    /// Vertical nudge in pixels.
    pub offset_y: f32,
    /// Flip the drawing horizontally, as a front camera preview does.
    pub mirror: bool,
    /// Composite the asset bitmap instead of a procedural style.
    pub use_asset: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: HairStyle::Fade,
            color: HairColor::default(),
            opacity: 0.85,
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            mirror: true,
            use_asset: false,
        }
    }
}

impl RenderConfig {
    /// A default configuration with the given style.
    pub fn new(style: HairStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: HairStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_color(mut self, color: HairColor) -> Self {
        self.color = color;
        self
    }

    /// Sets the opacity, clamped to 0.0-1.0.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Sets the scale, clamped to [`SCALE_RANGE`].
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale.clamp(*SCALE_RANGE.start(), *SCALE_RANGE.end());
        self
    }

    /// Sets both offsets, each clamped to [`OFFSET_RANGE`].
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        let (lo, hi) = (*OFFSET_RANGE.start(), *OFFSET_RANGE.end());
        self.offset_x = x.clamp(lo, hi);
        self.offset_y = y.clamp(lo, hi);
        self
    }

    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn with_use_asset(mut self, use_asset: bool) -> Self {
        self.use_asset = use_asset;
        self
    }

    /// Builds opacity and scale from integer percent sliders.
    pub fn with_percent_controls(self, opacity_pct: u32, scale_pct: u32) -> Self {
        self.with_opacity(opacity_pct as f32 / 100.0)
            .with_scale(scale_pct as f32 / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_style_names_render_nothing() {
        assert_eq!(HairStyle::from_name("Pompadour"), HairStyle::Pompadour);
        assert_eq!(HairStyle::from_name("mohawk"), HairStyle::None);
        assert_eq!(HairStyle::from_name(""), HairStyle::None);

        let style: HairStyle = serde_json::from_str("\"mullet\"").unwrap();
        assert_eq!(style, HairStyle::None);
        let style: HairStyle = serde_json::from_str("\"long\"").unwrap();
        assert_eq!(style, HairStyle::Long);
        assert_eq!(HairStyle::default(), HairStyle::None);

        for style in HairStyle::ALL {
            let json = serde_json::to_string(&style).unwrap();
            assert_eq!(json, format!("\"{style}\""));
            assert_eq!(serde_json::from_str::<HairStyle>(&json).unwrap(), style);
        }
    }

    #[test]
    fn style_names_match_display() {
        for style in HairStyle::ALL {
            assert_eq!(HairStyle::from_name(&style.to_string()), style);
        }
    }

    #[test]
    fn builders_clamp_to_control_ranges() {
        let config = RenderConfig::new(HairStyle::Buzz)
            .with_opacity(1.7)
            .with_scale(0.0)
            .with_offset(-900.0, 12.0);
        assert_eq!(config.opacity, 1.0);
        assert_eq!(config.scale, 0.25);
        assert_eq!(config.offset_x, -400.0);
        assert_eq!(config.offset_y, 12.0);
    }

    #[test]
    fn percent_controls() {
        let config = RenderConfig::default().with_percent_controls(60, 125);
        assert!((config.opacity - 0.6).abs() < 1e-6);
        assert!((config.scale - 1.25).abs() < 1e-6);
    }

    #[test]
    fn fields_bypass_clamping() {
        // Direct construction is the caller's responsibility.
        let config = RenderConfig {
            scale: 25.0,
            ..RenderConfig::default()
        };
        assert_eq!(config.scale, 25.0);
    }
}

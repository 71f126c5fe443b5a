//! Hair color parsing and tone derivation.

use std::str::FromStr;

use palette::{Hsl, IntoColor, Srgb, Srgba};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Lightness removed from the base color for detail layers.
const DETAIL_DARKEN: f32 = 0.08;

/// Extra alpha detail layers get over the configured opacity.
const DETAIL_ALPHA_BOOST: f32 = 0.12;

/// An opaque sRGB hair color, written as `#rrggbb` in profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HairColor(Srgb<u8>);

impl HairColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(Srgb::new(r, g, b))
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.0.red, self.0.green, self.0.blue)
    }

    /// The color at the given alpha.
    pub fn with_alpha(&self, alpha: f32) -> Srgba {
        let c: Srgb = self.0.into_format();
        Srgba::new(c.red, c.green, c.blue, alpha)
    }

    /// The darker tone used by stubble, spikes and strands.
    ///
    /// Alpha is `opacity + 0.12`, capped at 1.
    pub fn detail_tone(&self, opacity: f32) -> Srgba {
        let darkened = darken(self.0.into_format(), DETAIL_DARKEN);
        Srgba::new(
            darkened.red,
            darkened.green,
            darkened.blue,
            (opacity + DETAIL_ALPHA_BOOST).clamp(0.0, 1.0),
        )
    }
}

impl Default for HairColor {
    fn default() -> Self {
        Self::new(0x3b, 0x2a, 0x1f)
    }
}

fn darken(rgb: Srgb, amount: f32) -> Srgb {
    let mut hsl: Hsl = rgb.into_color();
    hsl.lightness = (hsl.lightness - amount).max(0.0);
    hsl.into_color()
}

impl FromStr for HairColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim())
            .map(HairColor)
            .map_err(|_| Error::InvalidColor(s.to_string()))
    }
}

impl std::fmt::Display for HairColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (r, g, b) = self.rgb();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl Serialize for HairColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HairColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "jsonschema")]
impl schemars::JsonSchema for HairColor {
    fn schema_name() -> String {
        "HairColor".to_string()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!("#ff8000".parse::<HairColor>().unwrap().rgb(), (255, 128, 0));
        assert_eq!("fa0".parse::<HairColor>().unwrap().rgb(), (255, 170, 0));
        assert_eq!(" #3B2A1F ".parse::<HairColor>().unwrap().rgb(), (0x3b, 0x2a, 0x1f));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "brown".parse::<HairColor>(),
            Err(Error::InvalidColor(s)) if s == "brown"
        ));
    }

    #[test]
    fn display_round_trips() {
        let color = HairColor::new(0x12, 0xab, 0xef);
        assert_eq!(color.to_string(), "#12abef");
        assert_eq!(color.to_string().parse::<HairColor>().unwrap(), color);
    }

    #[test]
    fn detail_tone_is_darker_and_more_opaque() {
        let color = HairColor::new(200, 120, 80);
        let base = color.with_alpha(0.5);
        let detail = color.detail_tone(0.5);

        let brightness = |c: Srgba| c.red + c.green + c.blue;
        assert!(brightness(detail) < brightness(base));
        assert!((detail.alpha - 0.62).abs() < 1e-6);
        assert_eq!(color.detail_tone(0.95).alpha, 1.0);
    }
}

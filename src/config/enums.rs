//! Configuration enum types.

use crate::draw::{Color, color::INK_BLUE};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a named color, a hex string, or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "black"
///
/// # Hex color
/// default_color = "#2563eb"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, white, black, ink) or `#rrggbb`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`].
    ///
    /// Unknown names fall back to the default ink color with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::parse_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using {}", name, INK_BLUE.to_hex());
                INK_BLUE
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::BLACK;

    #[test]
    fn named_hex_and_rgb_specs_resolve() {
        assert_eq!(ColorSpec::Name("black".into()).to_color(), BLACK);
        assert_eq!(ColorSpec::Name("#2563eb".into()).to_color(), INK_BLUE);
        assert_eq!(ColorSpec::Rgb([37, 99, 235]).to_color(), INK_BLUE);
    }

    #[test]
    fn unknown_names_fall_back_to_ink() {
        assert_eq!(ColorSpec::Name("mauve-ish".into()).to_color(), INK_BLUE);
    }
}

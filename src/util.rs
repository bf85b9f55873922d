//! Utility types and helpers for geometry and color names.
//!
//! This module provides:
//! - [`Point`] and [`Size`] in surface space
//! - Color name / hex parsing used by config, replay scripts and remote strokes

use crate::draw::{Color, color::*};
use serde::{Deserialize, Serialize};

// ============================================================================
// Geometry
// ============================================================================

/// Point in surface space (pixels, origin at the top-left of the buffer).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "white", "black", "ink"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "ink" => Some(INK_BLUE),
        _ => None,
    }
}

/// Parses either a color name or a `#rrggbb` / `#rgb` hex string.
pub fn parse_color(value: &str) -> Option<Color> {
    let trimmed = value.trim();
    if trimmed.starts_with('#') {
        Color::from_hex(trimmed)
    } else {
        name_to_color(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_color_accepts_names_and_hex() {
        assert_eq!(parse_color("Black"), Some(BLACK));
        assert_eq!(parse_color("#2563eb"), Some(INK_BLUE));
        assert_eq!(parse_color(" ink "), Some(INK_BLUE));
        assert!(parse_color("chartreuse").is_none());
    }
}

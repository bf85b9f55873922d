//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Surface size and growth settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Width of a fresh surface in pixels
    #[serde(default = "default_initial_width")]
    pub initial_width: i32,

    /// Height of a fresh surface in pixels
    #[serde(default = "default_initial_height")]
    pub initial_height: i32,

    /// Pixels added to an axis each time the surface grows
    #[serde(default = "default_expand_step")]
    pub expand_step: i32,

    /// Distance from the right/bottom edge that triggers growth while drawing
    #[serde(default = "default_edge_margin")]
    pub edge_margin: i32,

    /// Padding that committed text must keep from the right/bottom edge
    #[serde(default = "default_text_margin")]
    pub text_margin: i32,

    /// Maximum surface width; growth stops here (valid range: up to 32767)
    #[serde(default = "default_max_dimension")]
    pub max_width: i32,

    /// Maximum surface height; growth stops here (valid range: up to 32767)
    #[serde(default = "default_max_dimension")]
    pub max_height: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            initial_width: default_initial_width(),
            initial_height: default_initial_height(),
            expand_step: default_expand_step(),
            edge_margin: default_edge_margin(),
            text_margin: default_text_margin(),
            max_width: default_max_dimension(),
            max_height: default_max_dimension(),
        }
    }
}

/// Drawing tool defaults.
///
/// These only seed a fresh board; brush size and color change at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default brush color - a named color, `#rrggbb`, or `[r, g, b]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default brush size in pixels (valid range: 1.0 - 200.0)
    #[serde(default = "default_brush_size")]
    pub default_size: f64,

    /// Text pixel size as a multiple of the brush size (valid range: 1.0 - 20.0)
    #[serde(default = "default_text_size_factor")]
    pub text_size_factor: f64,

    /// Font family name for text stamping
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", or 100-900)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_size: default_brush_size(),
            text_size_factor: default_text_size_factor(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
        }
    }
}

/// Undo history settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Number of snapshots kept for undo (valid range: 1 - 500)
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
        }
    }
}

/// PNG export settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportSettings {
    /// Directory exported images are written to (`~/` is expanded)
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// File name without extension; chrono format specifiers are expanded
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            filename_template: default_filename_template(),
        }
    }
}

/// Shared-board settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BroadcastConfig {
    /// Line width used to replay strokes from other participants
    #[serde(default = "default_remote_line_width")]
    pub remote_line_width: f64,

    /// Events buffered per participant before the oldest are dropped
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            remote_line_width: default_remote_line_width(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_initial_width() -> i32 {
    1280
}

fn default_initial_height() -> i32 {
    720
}

fn default_expand_step() -> i32 {
    crate::growth::DEFAULT_EXPAND_STEP
}

fn default_edge_margin() -> i32 {
    crate::growth::DEFAULT_EDGE_MARGIN
}

fn default_text_margin() -> i32 {
    crate::growth::DEFAULT_TEXT_MARGIN
}

fn default_max_dimension() -> i32 {
    8192
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("#2563eb".to_string())
}

fn default_brush_size() -> f64 {
    5.0
}

fn default_text_size_factor() -> f64 {
    4.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_history_capacity() -> usize {
    crate::history::DEFAULT_CAPACITY
}

fn default_export_directory() -> String {
    "~/Pictures".to_string()
}

fn default_filename_template() -> String {
    "pizarra".to_string()
}

fn default_remote_line_width() -> f64 {
    2.0
}

fn default_channel_capacity() -> usize {
    1024
}

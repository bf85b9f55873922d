//! Configuration file support for pizarra.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/pizarra/config.toml`. Settings include the initial surface size,
//! growth limits, brush defaults, history depth, export location and shared-board options.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{BroadcastConfig, CanvasConfig, DrawingConfig, ExportSettings, HistoryConfig};

use crate::draw::MAX_DIMENSION;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// initial_width = 1280
/// initial_height = 720
/// expand_step = 100
/// max_width = 8192
///
/// [drawing]
/// default_color = "#2563eb"
/// default_size = 5.0
///
/// [history]
/// capacity = 50
///
/// [export]
/// directory = "~/Pictures"
/// filename_template = "pizarra"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Surface size and growth settings
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Brush and text defaults
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Undo history settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// PNG export settings
    #[serde(default)]
    pub export: ExportSettings,

    /// Shared-board settings
    #[serde(default)]
    pub broadcast: BroadcastConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `max_width` / `max_height`: 1 - 32767
    /// - `initial_width` / `initial_height`: 1 - the matching maximum
    /// - `expand_step`: 1 - 4096
    /// - `edge_margin` / `text_margin`: 0 - 1000
    /// - `default_size`: 1.0 - 200.0
    /// - `text_size_factor`: 1.0 - 20.0
    /// - `history.capacity`: 1 - 500
    /// - `remote_line_width`: 0.5 - 50.0
    /// - `channel_capacity`: 16 - 65536
    pub(crate) fn validate_and_clamp(&mut self) {
        let canvas = &mut self.canvas;

        clamp_i32("max_width", &mut canvas.max_width, 1, MAX_DIMENSION);
        clamp_i32("max_height", &mut canvas.max_height, 1, MAX_DIMENSION);
        clamp_i32("initial_width", &mut canvas.initial_width, 1, canvas.max_width);
        clamp_i32(
            "initial_height",
            &mut canvas.initial_height,
            1,
            canvas.max_height,
        );
        clamp_i32("expand_step", &mut canvas.expand_step, 1, 4096);
        clamp_i32("edge_margin", &mut canvas.edge_margin, 0, 1000);
        clamp_i32("text_margin", &mut canvas.text_margin, 0, 1000);

        clamp_f64("default_size", &mut self.drawing.default_size, 1.0, 200.0);
        clamp_f64(
            "text_size_factor",
            &mut self.drawing.text_size_factor,
            1.0,
            20.0,
        );

        if !(1..=500).contains(&self.history.capacity) {
            warn!(
                "Invalid history capacity {}, clamping to 1-500 range",
                self.history.capacity
            );
            self.history.capacity = self.history.capacity.clamp(1, 500);
        }

        clamp_f64(
            "remote_line_width",
            &mut self.broadcast.remote_line_width,
            0.5,
            50.0,
        );
        if !(16..=65536).contains(&self.broadcast.channel_capacity) {
            warn!(
                "Invalid channel_capacity {}, clamping to 16-65536 range",
                self.broadcast.channel_capacity
            );
            self.broadcast.channel_capacity = self.broadcast.channel_capacity.clamp(16, 65536);
        }

        let valid_weight = matches!(
            self.drawing.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                self.drawing.font_weight
            );
            self.drawing.font_weight = "normal".to_string();
        }

        if !matches!(
            self.drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.drawing.font_style
            );
            self.drawing.font_style = "normal".to_string();
        }

        if self.export.filename_template.trim().is_empty() {
            warn!("Empty export filename_template, falling back to 'pizarra'");
            self.export.filename_template = "pizarra".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("pizarra");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file is missing.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the effective configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_i32(name: &str, value: &mut i32, min: i32, max: i32) {
    if !(min..=max).contains(&*value) {
        warn!("Invalid {name} {value}, clamping to {min}-{max} range");
        *value = (*value).clamp(min, max);
    }
}

fn clamp_f64(name: &str, value: &mut f64, min: f64, max: f64) {
    if !(min..=max).contains(&*value) {
        warn!("Invalid {name} {value:.1}, clamping to {min:.1}-{max:.1} range");
        *value = if value.is_nan() {
            min
        } else {
            (*value).clamp(min, max)
        };
    }
}

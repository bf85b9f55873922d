//! Writing board snapshots to disk as PNG files.

use crate::config::ExportSettings;
use crate::draw::SurfaceError;
use chrono::Local;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode board: {0}")]
    Encode(#[from] SurfaceError),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where and under which name exported images are written.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Directory exported images are written to.
    pub directory: PathBuf,
    /// File name without extension (supports chrono format specifiers).
    pub filename_template: String,
    /// Image format extension.
    pub format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::from_settings(&ExportSettings::default())
    }
}

impl ExportConfig {
    pub fn from_settings(settings: &ExportSettings) -> Self {
        Self {
            directory: expand_tilde(&settings.directory),
            filename_template: settings.filename_template.clone(),
            format: "png".to_string(),
        }
    }

    /// Full path the next export would be written to.
    pub fn target_path(&self) -> PathBuf {
        self.directory
            .join(generate_filename(&self.filename_template, &self.format))
    }
}

/// Generate a filename based on the template and current time.
///
/// A template with no format specifiers (the default `pizarra`) yields a fixed
/// name. An invalid specifier falls back to the literal template.
pub fn generate_filename(template: &str, format: &str) -> String {
    let mut name = String::new();
    if write!(name, "{}", Local::now().format(template)).is_err() {
        log::warn!("Invalid filename template '{}', using it verbatim", template);
        name = template.to_string();
    }
    format!("{}.{}", name, format)
}

/// Ensure the export directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory).map_err(|source| ExportError::Io {
            path: directory.to_path_buf(),
            source,
        })?;
    }
    Ok(directory.to_path_buf())
}

/// Writes encoded PNG bytes to `path`, creating parent directories.
pub fn write_png(png: &[u8], path: &Path) -> Result<PathBuf, ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory_exists(parent)?;
    }

    log::info!("Saving board to: {} ({} bytes)", path.display(), png.len());
    fs::write(path, png).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(path.to_path_buf())
}

/// Saves PNG bytes into the configured directory. Returns the written path.
pub fn save_png(png: &[u8], config: &ExportConfig) -> Result<PathBuf, ExportError> {
    ensure_directory_exists(&config.directory)?;
    write_png(png, &config.target_path())
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

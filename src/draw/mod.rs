//! Raster drawing primitives (Cairo-based).
//!
//! This module defines the pixel-level drawing model of the board:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`RasterSurface`]: the growable pixel buffer and its draw primitives
//! - [`Snapshot`]: immutable PNG-encoded copies of the buffer
//! - [`FontDescriptor`]: font selection for text stamping

pub mod color;
pub mod error;
pub mod font;
pub mod snapshot;
pub mod surface;

pub use color::Color;
pub use error::SurfaceError;
pub use font::FontDescriptor;
pub use snapshot::Snapshot;
pub use surface::{MAX_DIMENSION, RasterSurface, Rgba};

pub use color::{BLACK, BLUE, GREEN, INK_BLUE, RED, WHITE};

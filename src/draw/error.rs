//! Error type shared by the raster surface and history snapshots.

use thiserror::Error;

/// Errors raised by [`RasterSurface`](super::RasterSurface) and snapshot handling.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("surface cannot shrink from {current_width}x{current_height} to {width}x{height}")]
    Shrink {
        current_width: i32,
        current_height: i32,
        width: i32,
        height: i32,
    },

    #[error("failed to allocate {width}x{height} surface: {source}")]
    Allocation {
        width: i32,
        height: i32,
        #[source]
        source: cairo::Error,
    },

    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] cairo::IoError),

    #[error("failed to decode snapshot: {0}")]
    Decode(String),

    #[error("surface data unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),
}

//! Immutable encoded copies of the surface content.

use super::SurfaceError;
use crate::util::Size;
use cairo::ImageSurface;
use std::rc::Rc;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// PNG-encoded copy of the full surface at one instant.
///
/// The encoded bytes are shared, so cloning a snapshot never copies pixel data
/// and nothing can mutate it after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    png: Rc<[u8]>,
    size: Size,
}

impl Snapshot {
    pub(crate) fn encoded(png: Vec<u8>, size: Size) -> Self {
        Self {
            png: png.into(),
            size,
        }
    }

    /// Wraps externally supplied PNG data (e.g. an image file to open).
    ///
    /// Only the PNG signature and header are validated here; pixel data is
    /// decoded lazily when the snapshot is loaded.
    pub fn from_png(bytes: Vec<u8>) -> Result<Self, SurfaceError> {
        let size = png_dimensions(&bytes)?;
        Ok(Self::encoded(bytes, size))
    }

    /// Encoded PNG bytes, suitable for writing straight to a `.png` file.
    pub fn as_png(&self) -> &[u8] {
        &self.png
    }

    /// Dimensions of the surface this snapshot was taken from.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Decodes the PNG payload into a scratch surface.
    pub(crate) fn decode(&self) -> Result<DecodedSnapshot, SurfaceError> {
        let mut reader: &[u8] = &self.png;
        let surface = ImageSurface::create_from_png(&mut reader)
            .map_err(|err| SurfaceError::Decode(err.to_string()))?;
        Ok(DecodedSnapshot { surface })
    }
}

/// Decoded pixels of a snapshot, ready to be composed onto a surface.
pub(crate) struct DecodedSnapshot {
    pub(crate) surface: ImageSurface,
}

fn png_dimensions(bytes: &[u8]) -> Result<Size, SurfaceError> {
    // signature, IHDR length (4), "IHDR", width (4), height (4)
    if bytes.len() < 24 || bytes[..8] != PNG_SIGNATURE || &bytes[12..16] != b"IHDR" {
        return Err(SurfaceError::Decode("not a PNG image".to_string()));
    }

    let read_u32 = |offset: usize| {
        u32::from_be_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    };
    let width = i32::try_from(read_u32(16)).unwrap_or(0);
    let height = i32::try_from(read_u32(20)).unwrap_or(0);
    if width <= 0 || height <= 0 {
        return Err(SurfaceError::Decode(format!(
            "PNG header reports invalid size {width}x{height}"
        )));
    }

    Ok(Size::new(width, height))
}

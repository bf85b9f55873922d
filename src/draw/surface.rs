//! Cairo-backed raster surface.
//!
//! The surface owns a single `ARgb32` image buffer. All draw primitives clip to the
//! current buffer bounds: writes outside the buffer are silently dropped. Resizing
//! and snapshot loading build the new buffer first and only swap it in once it is
//! complete, so a failure always leaves the last good buffer in place.

use super::snapshot::DecodedSnapshot;
use super::{Color, FontDescriptor, Snapshot, SurfaceError};
use crate::util::{Point, Size};
use cairo::{Context, Format, ImageSurface, LineCap, LineJoin, Operator};
use log::{debug, warn};

/// Largest dimension cairo can allocate for an image surface.
pub const MAX_DIMENSION: i32 = 32767;

/// Premultiplied pixel value in `[r, g, b, a]` order.
pub type Rgba = [u8; 4];

/// Exclusively owned pixel buffer with draw, resize and snapshot operations.
pub struct RasterSurface {
    surface: ImageSurface,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl RasterSurface {
    /// Allocates a blank (fully transparent) surface.
    pub fn new(width: i32, height: i32) -> Result<Self, SurfaceError> {
        Ok(Self {
            surface: allocate(width, height)?,
        })
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Draws a round-capped line segment.
    pub fn stroke_segment(&mut self, from: Point, to: Point, color: Color, width: f64) {
        self.paint_with("stroke segment", |ctx| {
            ctx.set_source_rgba(color.r, color.g, color.b, color.a);
            ctx.set_line_width(width);
            ctx.set_line_cap(LineCap::Round);
            ctx.set_line_join(LineJoin::Round);
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
            ctx.stroke()
        });
    }

    /// Clears an axis-aligned `size x size` square centred on `center` to background.
    pub fn erase(&mut self, center: Point, size: f64) {
        let half = size / 2.0;
        self.paint_with("erase", |ctx| {
            ctx.set_operator(Operator::Clear);
            ctx.rectangle(center.x - half, center.y - half, size, size);
            ctx.fill()
        });
    }

    /// Clears the whole buffer to background.
    pub fn clear(&mut self) {
        self.paint_with("clear", |ctx| {
            ctx.set_operator(Operator::Clear);
            ctx.paint()
        });
    }

    /// Measures the logical width of `text` in pixels at `pixel_size`.
    pub fn measure_text(
        &self,
        text: &str,
        font: &FontDescriptor,
        pixel_size: f64,
    ) -> Result<f64, SurfaceError> {
        let ctx = Context::new(&self.surface)?;
        let layout = text_layout(&ctx, text, font, pixel_size);
        let (width, _height) = layout.pixel_size();
        Ok(width as f64)
    }

    /// Rasterizes `text` with its first baseline at `position`.
    pub fn stamp_text(
        &mut self,
        position: Point,
        text: &str,
        font: &FontDescriptor,
        pixel_size: f64,
        color: Color,
    ) {
        self.paint_with("stamp text", |ctx| {
            let layout = text_layout(ctx, text, font, pixel_size);
            // Pango positions layouts by their top-left corner
            let baseline = layout.baseline() as f64 / pango::SCALE as f64;
            ctx.set_source_rgba(color.r, color.g, color.b, color.a);
            ctx.move_to(position.x, position.y - baseline);
            pangocairo::functions::show_layout(ctx, &layout);
            ctx.status()
        });
    }

    /// Grows the buffer, keeping every existing pixel at the same coordinate.
    ///
    /// Shrinking is rejected. On allocation failure the current buffer is untouched.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), SurfaceError> {
        let (current_width, current_height) = (self.width(), self.height());
        if width < current_width || height < current_height {
            return Err(SurfaceError::Shrink {
                current_width,
                current_height,
                width,
                height,
            });
        }
        if width == current_width && height == current_height {
            return Ok(());
        }

        let next = allocate(width, height)?;
        compose_source(&next, &self.surface)?;
        self.surface = next;

        debug!(
            "Surface resized from {}x{} to {}x{}",
            current_width, current_height, width, height
        );
        Ok(())
    }

    /// Encodes the full buffer as a PNG snapshot.
    pub fn export_snapshot(&self) -> Result<Snapshot, SurfaceError> {
        let mut png = Vec::new();
        self.surface
            .write_to_png(&mut png)
            .map_err(SurfaceError::Encode)?;
        Ok(Snapshot::encoded(png, self.size()))
    }

    /// Replaces the buffer content with `snapshot`, keeping the current dimensions.
    ///
    /// Regions not covered by the snapshot return to background. A snapshot that
    /// fails to decode leaves the surface unchanged.
    pub fn load_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), SurfaceError> {
        let decoded = snapshot.decode()?;
        self.apply_decoded(&decoded)
    }

    pub(crate) fn apply_decoded(&mut self, decoded: &DecodedSnapshot) -> Result<(), SurfaceError> {
        let next = allocate(self.width(), self.height())?;
        compose_source(&next, &decoded.surface)?;
        self.surface = next;
        Ok(())
    }

    /// Reads one pixel, or `None` outside the buffer.
    pub fn pixel(&mut self, x: i32, y: i32) -> Result<Option<Rgba>, SurfaceError> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return Ok(None);
        }
        let stride = self.surface.stride() as usize;
        let data = self.surface.data()?;
        let offset = y as usize * stride + x as usize * 4;
        Ok(Some(argb_to_rgba(&data[offset..offset + 4])))
    }

    /// Copies the whole buffer row by row as `[r, g, b, a]` pixels.
    pub fn pixels(&mut self) -> Result<Vec<Rgba>, SurfaceError> {
        let (width, height) = (self.width() as usize, self.height() as usize);
        let stride = self.surface.stride() as usize;
        let data = self.surface.data()?;

        let mut out = Vec::with_capacity(width * height);
        for row in data.chunks(stride).take(height) {
            out.extend(row[..width * 4].chunks_exact(4).map(argb_to_rgba));
        }
        Ok(out)
    }

    fn paint_with<F>(&mut self, what: &str, draw: F)
    where
        F: FnOnce(&Context) -> Result<(), cairo::Error>,
    {
        let result = Context::new(&self.surface).and_then(|ctx| draw(&ctx));
        if let Err(err) = result {
            warn!("Failed to {what}: {err}");
        }
    }
}

fn allocate(width: i32, height: i32) -> Result<ImageSurface, SurfaceError> {
    if width <= 0 || height <= 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(SurfaceError::InvalidSize { width, height });
    }
    ImageSurface::create(Format::ARgb32, width, height).map_err(|source| {
        SurfaceError::Allocation {
            width,
            height,
            source,
        }
    })
}

/// Copies `source` onto `target` at (0, 0), replacing whatever was there.
fn compose_source(target: &ImageSurface, source: &ImageSurface) -> Result<(), SurfaceError> {
    let ctx = Context::new(target)?;
    ctx.set_operator(Operator::Source);
    ctx.set_source_surface(source, 0.0, 0.0)?;
    ctx.paint()?;
    Ok(())
}

fn text_layout(ctx: &Context, text: &str, font: &FontDescriptor, pixel_size: f64) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(ctx);
    layout.set_font_description(Some(&font.to_pango(pixel_size)));
    layout.set_text(text);
    layout
}

fn argb_to_rgba(bytes: &[u8]) -> Rgba {
    let value = u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    [
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
        (value >> 24) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, RED};

    fn opaque(pixel: Option<Rgba>) -> bool {
        pixel.is_some_and(|p| p[3] == 255)
    }

    #[test]
    fn new_surface_is_transparent() {
        let mut surface = RasterSurface::new(8, 4).unwrap();
        assert!(surface.pixels().unwrap().iter().all(|p| *p == [0, 0, 0, 0]));
        assert_eq!(surface.size(), Size::new(8, 4));
    }

    #[test]
    fn rejects_invalid_dimensions() {
        assert!(matches!(
            RasterSurface::new(0, 10),
            Err(SurfaceError::InvalidSize { .. })
        ));
        assert!(matches!(
            RasterSurface::new(10, MAX_DIMENSION + 1),
            Err(SurfaceError::InvalidSize { .. })
        ));
    }

    #[test]
    fn stroke_segment_paints_along_the_line() {
        let mut surface = RasterSurface::new(40, 40).unwrap();
        surface.stroke_segment(Point::new(5.0, 20.0), Point::new(35.0, 20.0), RED, 6.0);

        assert_eq!(surface.pixel(20, 20).unwrap(), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(20, 5).unwrap(), Some([0, 0, 0, 0]));
    }

    #[test]
    fn round_caps_extend_past_endpoints() {
        let mut surface = RasterSurface::new(40, 40).unwrap();
        surface.stroke_segment(Point::new(10.0, 20.0), Point::new(30.0, 20.0), BLACK, 10.0);

        // Butt caps would stop at x = 30
        assert!(opaque(surface.pixel(33, 20).unwrap()));
    }

    #[test]
    fn drawing_outside_bounds_is_a_noop() {
        let mut surface = RasterSurface::new(20, 20).unwrap();
        surface.stroke_segment(Point::new(100.0, 100.0), Point::new(200.0, 150.0), RED, 4.0);
        surface.erase(Point::new(-50.0, -50.0), 10.0);

        assert!(surface.pixels().unwrap().iter().all(|p| *p == [0, 0, 0, 0]));
    }

    #[test]
    fn erase_clears_a_centered_square() {
        let mut surface = RasterSurface::new(30, 30).unwrap();
        surface.stroke_segment(Point::new(0.0, 15.0), Point::new(30.0, 15.0), BLACK, 30.0);
        surface.erase(Point::new(15.0, 15.0), 10.0);

        assert_eq!(surface.pixel(15, 15).unwrap(), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(11, 11).unwrap(), Some([0, 0, 0, 0]));
        assert!(opaque(surface.pixel(8, 15).unwrap()));
        assert!(opaque(surface.pixel(22, 15).unwrap()));
    }

    #[test]
    fn resize_preserves_existing_pixels() {
        let mut surface = RasterSurface::new(50, 40).unwrap();
        surface.stroke_segment(Point::new(3.0, 3.0), Point::new(47.0, 37.0), RED, 3.0);
        let before = surface.pixels().unwrap();

        surface.resize(150, 140).unwrap();
        assert_eq!(surface.size(), Size::new(150, 140));

        for y in 0..40 {
            for x in 0..50 {
                assert_eq!(
                    surface.pixel(x, y).unwrap(),
                    Some(before[(y * 50 + x) as usize]),
                    "pixel ({x}, {y}) moved"
                );
            }
        }
        assert_eq!(surface.pixel(120, 100).unwrap(), Some([0, 0, 0, 0]));
    }

    #[test]
    fn resize_refuses_to_shrink() {
        let mut surface = RasterSurface::new(50, 40).unwrap();
        assert!(matches!(
            surface.resize(49, 40),
            Err(SurfaceError::Shrink { .. })
        ));
        assert_eq!(surface.size(), Size::new(50, 40));
    }

    #[test]
    fn failed_resize_keeps_last_good_buffer() {
        let mut surface = RasterSurface::new(20, 20).unwrap();
        surface.stroke_segment(Point::new(0.0, 10.0), Point::new(20.0, 10.0), RED, 4.0);
        let before = surface.pixels().unwrap();

        assert!(surface.resize(MAX_DIMENSION + 100, 20).is_err());
        assert_eq!(surface.size(), Size::new(20, 20));
        assert_eq!(surface.pixels().unwrap(), before);
    }

    #[test]
    fn load_snapshot_clears_uncovered_regions() {
        let mut small = RasterSurface::new(20, 20).unwrap();
        small.stroke_segment(Point::new(0.0, 10.0), Point::new(20.0, 10.0), RED, 4.0);
        let snapshot = small.export_snapshot().unwrap();

        let mut big = RasterSurface::new(60, 60).unwrap();
        big.stroke_segment(Point::new(0.0, 50.0), Point::new(60.0, 50.0), BLACK, 6.0);
        big.load_snapshot(&snapshot).unwrap();

        assert_eq!(big.size(), Size::new(60, 60));
        assert_eq!(big.pixel(10, 10).unwrap(), Some([255, 0, 0, 255]));
        assert_eq!(big.pixel(30, 50).unwrap(), Some([0, 0, 0, 0]));
    }

    #[test]
    fn malformed_snapshot_leaves_surface_unchanged() {
        let mut surface = RasterSurface::new(20, 20).unwrap();
        surface.stroke_segment(Point::new(0.0, 10.0), Point::new(20.0, 10.0), RED, 4.0);
        let before = surface.pixels().unwrap();

        let mut bogus = surface.export_snapshot().unwrap().as_png().to_vec();
        bogus.truncate(40);
        let snapshot = Snapshot::from_png(bogus).unwrap();

        assert!(matches!(
            surface.load_snapshot(&snapshot),
            Err(SurfaceError::Decode(_))
        ));
        assert_eq!(surface.pixels().unwrap(), before);
    }

    #[test]
    fn snapshot_round_trip_is_bit_identical() {
        let mut surface = RasterSurface::new(64, 48).unwrap();
        surface.stroke_segment(Point::new(4.5, 7.25), Point::new(60.0, 40.0), RED, 5.0);
        surface.erase(Point::new(30.0, 25.0), 7.0);
        let before = surface.pixels().unwrap();
        let snapshot = surface.export_snapshot().unwrap();

        surface.clear();
        surface.load_snapshot(&snapshot).unwrap();
        assert_eq!(surface.pixels().unwrap(), before);
    }
}

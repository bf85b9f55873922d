//! Scroll container abstraction.
//!
//! The board never sets an absolute scroll position: it reads the current
//! offset and asks for relative adjustments (panning, growth compensation).

use super::events::{ClientPoint, ClientRect};
use crate::util::Size;

/// Hosting scroll container of the surface.
pub trait Viewport {
    /// Current scroll offset `(left, top)`.
    fn scroll_offset(&self) -> (f64, f64);

    /// Scrolls by a relative amount. Implementations may clamp.
    fn scroll_by(&mut self, dx: f64, dy: f64);

    /// Called after the surface has been resized.
    fn content_resized(&mut self, _size: Size) {}

    /// Client-space position of the scroll container's top-left corner.
    fn origin(&self) -> ClientPoint {
        ClientPoint::default()
    }

    /// Client-space bounding rect of the surface.
    fn surface_rect(&self) -> ClientRect {
        let (left, top) = self.scroll_offset();
        let origin = self.origin();
        ClientRect::new(origin.x - left, origin.y - top)
    }
}

/// In-memory scroll container behaving like a browser overflow element:
/// offsets stay within `[0, content - view]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollViewport {
    origin: ClientPoint,
    view: Size,
    content: Size,
    left: f64,
    top: f64,
}

impl ScrollViewport {
    pub fn new(view: Size, content: Size) -> Self {
        Self {
            origin: ClientPoint::default(),
            view,
            content,
            left: 0.0,
            top: 0.0,
        }
    }

    pub fn with_origin(mut self, origin: ClientPoint) -> Self {
        self.origin = origin;
        self
    }

    fn max_offset(&self) -> (f64, f64) {
        (
            (self.content.width - self.view.width).max(0) as f64,
            (self.content.height - self.view.height).max(0) as f64,
        )
    }

    fn clamp_offsets(&mut self) {
        let (max_left, max_top) = self.max_offset();
        self.left = self.left.clamp(0.0, max_left);
        self.top = self.top.clamp(0.0, max_top);
    }
}

impl Viewport for ScrollViewport {
    fn scroll_offset(&self) -> (f64, f64) {
        (self.left, self.top)
    }

    fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.left += dx;
        self.top += dy;
        self.clamp_offsets();
    }

    fn content_resized(&mut self, size: Size) {
        self.content = size;
        self.clamp_offsets();
    }

    fn origin(&self) -> ClientPoint {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolling_is_clamped_to_content() {
        let mut viewport = ScrollViewport::new(Size::new(800, 600), Size::new(900, 600));
        viewport.scroll_by(250.0, 40.0);
        assert_eq!(viewport.scroll_offset(), (100.0, 0.0));

        viewport.scroll_by(-500.0, 0.0);
        assert_eq!(viewport.scroll_offset(), (0.0, 0.0));
    }

    #[test]
    fn growth_makes_room_for_compensation() {
        let mut viewport = ScrollViewport::new(Size::new(800, 600), Size::new(800, 600));
        viewport.scroll_by(100.0, 0.0);
        assert_eq!(viewport.scroll_offset(), (0.0, 0.0));

        viewport.content_resized(Size::new(900, 600));
        viewport.scroll_by(100.0, 0.0);
        assert_eq!(viewport.scroll_offset(), (100.0, 0.0));
    }

    #[test]
    fn surface_rect_moves_against_scroll() {
        let mut viewport = ScrollViewport::new(Size::new(400, 300), Size::new(1000, 1000))
            .with_origin(ClientPoint::new(10.0, 60.0));
        viewport.scroll_by(30.0, 20.0);
        assert_eq!(viewport.surface_rect(), ClientRect::new(-20.0, 40.0));
    }
}

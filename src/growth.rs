//! Step-wise canvas growth.
//!
//! The surface grows in fixed steps when a drawn point comes close to the right
//! or bottom edge, or when committed text would not fit. Growth is capped by a
//! configured maximum per axis; an axis at its maximum simply stops growing and
//! further drawing past it is clipped by the surface.

use crate::config::CanvasConfig;
use crate::draw::MAX_DIMENSION;
use crate::util::{Point, Size};
use log::debug;

/// Default growth step in pixels.
pub const DEFAULT_EXPAND_STEP: i32 = 100;
/// Default distance from the edge that triggers growth while drawing.
pub const DEFAULT_EDGE_MARGIN: i32 = 50;
/// Default padding required around committed text.
pub const DEFAULT_TEXT_MARGIN: i32 = 20;

/// Outcome of a growth check: the new dimensions and the increment per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Growth {
    pub size: Size,
    pub dx: i32,
    pub dy: i32,
}

/// Decides when and by how much the surface grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPolicy {
    step: i32,
    edge_margin: i32,
    text_margin: i32,
    max_width: i32,
    max_height: i32,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXPAND_STEP,
            DEFAULT_EDGE_MARGIN,
            DEFAULT_TEXT_MARGIN,
            Size::new(MAX_DIMENSION, MAX_DIMENSION),
        )
    }
}

impl GrowthPolicy {
    /// Creates a policy. The maximum is capped at [`MAX_DIMENSION`].
    pub fn new(step: i32, edge_margin: i32, text_margin: i32, max: Size) -> Self {
        Self {
            step: step.max(1),
            edge_margin: edge_margin.max(0),
            text_margin: text_margin.max(0),
            max_width: max.width.clamp(1, MAX_DIMENSION),
            max_height: max.height.clamp(1, MAX_DIMENSION),
        }
    }

    pub fn from_config(config: &CanvasConfig) -> Self {
        Self::new(
            config.expand_step,
            config.edge_margin,
            config.text_margin,
            Size::new(config.max_width, config.max_height),
        )
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    pub fn max_size(&self) -> Size {
        Size::new(self.max_width, self.max_height)
    }

    /// Proximity trigger for brush and eraser points.
    ///
    /// Each axis grows independently by one step when the point is within the
    /// edge margin of that axis's far edge.
    pub fn for_point(&self, point: Point, current: Size) -> Option<Growth> {
        let grow_x = point.x >= (current.width - self.edge_margin) as f64;
        let grow_y = point.y >= (current.height - self.edge_margin) as f64;
        self.grow(current, grow_x, grow_y)
    }

    /// Text-bounds trigger, evaluated before committed text is stamped.
    ///
    /// An axis grows by exactly one step (never to an exact fit) when the text
    /// plus margin extends past it.
    pub fn for_text(
        &self,
        origin: Point,
        text_width: f64,
        text_height: f64,
        current: Size,
    ) -> Option<Growth> {
        let margin = self.text_margin as f64;
        let required_width = origin.x + text_width + margin;
        let required_height = origin.y + text_height + margin;
        self.grow(
            current,
            required_width > current.width as f64,
            required_height > current.height as f64,
        )
    }

    fn grow(&self, current: Size, grow_x: bool, grow_y: bool) -> Option<Growth> {
        let dx = if grow_x {
            axis_increment(current.width, self.step, self.max_width)
        } else {
            0
        };
        let dy = if grow_y {
            axis_increment(current.height, self.step, self.max_height)
        } else {
            0
        };

        if (grow_x && dx == 0) || (grow_y && dy == 0) {
            debug!(
                "Surface growth capped at {}x{} (current {}x{})",
                self.max_width, self.max_height, current.width, current.height
            );
        }
        if dx == 0 && dy == 0 {
            return None;
        }

        Some(Growth {
            size: Size::new(current.width + dx, current.height + dy),
            dx,
            dy,
        })
    }
}

fn axis_increment(current: i32, step: i32, max: i32) -> i32 {
    if current >= max {
        0
    } else {
        step.min(max - current)
    }
}

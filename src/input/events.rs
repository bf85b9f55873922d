//! Pointer event types and client-to-surface coordinate mapping.

use crate::util::Point;
use serde::{Deserialize, Serialize};

/// Position in client (window) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientPoint {
    pub x: f64,
    pub y: f64,
}

impl ClientPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding rectangle of the surface in client space.
///
/// `left`/`top` already include the effect of scrolling: scrolling the container
/// right by 100 moves the surface's left edge to -100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
}

impl ClientRect {
    pub const fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// Raw pointer input from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerInput {
    /// Mouse or pen event at a client position
    Mouse { x: f64, y: f64 },
    /// Touch event with every active touch point; only the first one is used
    Touch { touches: Vec<ClientPoint> },
}

impl PointerInput {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self::Mouse { x, y }
    }

    pub fn touch(x: f64, y: f64) -> Self {
        Self::Touch {
            touches: vec![ClientPoint::new(x, y)],
        }
    }

    /// Client position of the primary pointer, if there is one.
    pub fn client_position(&self) -> Option<ClientPoint> {
        match self {
            Self::Mouse { x, y } => Some(ClientPoint::new(*x, *y)),
            Self::Touch { touches } => touches.first().copied(),
        }
    }
}

/// Maps a pointer event to surface coordinates.
///
/// Returns `client - rect` without clamping; values may be negative or past the
/// surface edge. A touch event with no active touches (touch end) has no position.
pub fn to_surface_coords(input: &PointerInput, rect: ClientRect) -> Option<Point> {
    input
        .client_position()
        .map(|client| Point::new(client.x - rect.left, client.y - rect.top))
}

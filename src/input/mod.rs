//! Input handling and tool state machine.
//!
//! This module translates host pointer, toolbar and text-box events into board
//! operations. It maps client coordinates onto the surface, keeps the current tool
//! parameters, and runs the state machine for the drawing modes (idle, stroke,
//! pan, text edit).

pub mod events;
pub mod state;
pub mod tool;
pub mod viewport;

// Re-export commonly used types at module level
pub use events::{ClientPoint, ClientRect, PointerInput, to_surface_coords};
pub use state::{DrawingState, InputState, TextCommit, ToolState};
pub use tool::Tool;
pub use viewport::{ScrollViewport, Viewport};

mod actions;
mod core;
mod pointer;
mod text;

pub use self::core::{DrawingState, InputState, ToolState};
pub use text::TextCommit;

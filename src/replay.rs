//! Scripted board sessions.
//!
//! A script is a JSON array of steps that drive an [`InputState`] exactly like a
//! host would: tool changes, pointer events, text edits and history actions.
//!
//! ```json
//! [
//!   { "op": "color", "color": "#ff0000" },
//!   { "op": "down", "x": 10, "y": 10 },
//!   { "op": "move", "x": 200, "y": 40 },
//!   { "op": "up" },
//!   { "op": "text", "x": 30, "y": 120, "text": "Hola" },
//!   { "op": "undo" }
//! ]
//! ```

use crate::draw::SurfaceError;
use crate::input::{ClientPoint, InputState, PointerInput, Tool};
use crate::util::{self, Point};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Step {index}: unknown color '{color}'")]
    InvalidColor { index: usize, color: String },

    #[error("Step {index}: {source}")]
    Surface {
        index: usize,
        #[source]
        source: SurfaceError,
    },
}

/// One scripted host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Select a tool by id
    Tool { tool: Tool },
    /// Set the brush size
    Size { size: f64 },
    /// Set the brush color (name or `#rrggbb`)
    Color { color: String },
    /// Mouse press at a client position
    Down { x: f64, y: f64 },
    /// Mouse move at a client position
    Move { x: f64, y: f64 },
    /// Mouse release
    Up,
    /// Pointer left the board
    Leave,
    /// Touch start/move with the active touch points
    Touch {
        phase: TouchPhase,
        #[serde(default)]
        touches: Vec<ClientPoint>,
    },
    /// Open a text edit at a surface position
    TextOpen { x: f64, y: f64 },
    /// Commit the open text edit with this content
    TextCommit { text: String },
    /// Discard the open text edit
    TextCancel,
    /// Open, fill and commit a text edit in one step
    Text { x: f64, y: f64, text: String },
    Undo,
    Redo,
    /// Apply any in-flight history load
    Settle,
    /// Scroll the viewport by a relative amount
    Pan { dx: f64, dy: f64 },
    /// Wipe the board
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

/// Reads a script from a JSON file.
pub fn load_script(path: &Path) -> Result<Vec<Step>, ReplayError> {
    let text = fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&text)
}

pub fn parse_script(text: &str) -> Result<Vec<Step>, ReplayError> {
    Ok(serde_json::from_str(text)?)
}

/// Runs `steps` against `state`. Returns the number of steps executed.
///
/// Stops at the first step that fails. Undo/redo loads are left pending until the
/// next edit or an explicit `settle`, like a host waiting for image decoding.
pub fn run(state: &mut InputState, steps: &[Step]) -> Result<usize, ReplayError> {
    for (index, step) in steps.iter().enumerate() {
        debug!("Replay step {}: {:?}", index, step);
        apply(state, index, step)?;
    }
    Ok(steps.len())
}

fn apply(state: &mut InputState, index: usize, step: &Step) -> Result<(), ReplayError> {
    let surface_err = |source: SurfaceError| ReplayError::Surface { index, source };

    match step {
        Step::Tool { tool } => state.select_tool(*tool),
        Step::Size { size } => state.set_brush_size(*size),
        Step::Color { color } => {
            let parsed = util::parse_color(color).ok_or_else(|| ReplayError::InvalidColor {
                index,
                color: color.clone(),
            })?;
            state.set_color(parsed);
        }
        Step::Down { x, y } => state.on_pointer_down(&PointerInput::mouse(*x, *y)),
        Step::Move { x, y } => state.on_pointer_move(&PointerInput::mouse(*x, *y)),
        Step::Up => state.on_pointer_up(),
        Step::Leave => state.on_pointer_leave(),
        Step::Touch { phase, touches } => {
            let input = PointerInput::Touch {
                touches: touches.clone(),
            };
            match phase {
                TouchPhase::Start => state.on_pointer_down(&input),
                TouchPhase::Move => state.on_pointer_move(&input),
                TouchPhase::End => state.on_pointer_up(),
            }
        }
        Step::TextOpen { x, y } => state.open_text_edit(Point::new(*x, *y)),
        Step::TextCommit { text } => {
            state.set_text(text);
            state.commit_text().map_err(surface_err)?;
        }
        Step::TextCancel => state.cancel_text(),
        Step::Text { x, y, text } => {
            state
                .insert_text(Point::new(*x, *y), text)
                .map_err(surface_err)?;
        }
        Step::Undo => {
            state.undo().map_err(surface_err)?;
        }
        Step::Redo => {
            state.redo().map_err(surface_err)?;
        }
        Step::Settle => {
            if !state.finish_pending_load().map_err(surface_err)? {
                warn!("Step {}: nothing to settle", index);
            }
        }
        Step::Pan { dx, dy } => state.viewport_mut().scroll_by(*dx, *dy),
        Step::Clear => state.clear_canvas(),
    }
    Ok(())
}

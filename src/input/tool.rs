//! Drawing tool selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// The active tool determines what a pointer drag does on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Freehand round-capped strokes (default)
    #[default]
    Brush,
    /// Clears square patches under the pointer
    Eraser,
    /// Click to place a text edit, commit to stamp it
    Text,
    /// Drag to scroll the viewport
    Hand,
}

impl Tool {
    /// Tool id as used by toolbars and scripts.
    pub fn id(&self) -> &'static str {
        match self {
            Tool::Brush => "brush",
            Tool::Eraser => "eraser",
            Tool::Text => "text",
            Tool::Hand => "hand",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned for an unknown tool id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool '{0}' (expected brush, eraser, text or hand)")]
pub struct UnknownTool(pub String);

impl FromStr for Tool {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brush" => Ok(Tool::Brush),
            "eraser" => Ok(Tool::Eraser),
            "text" => Ok(Tool::Text),
            "hand" => Ok(Tool::Hand),
            _ => Err(UnknownTool(s.to_string())),
        }
    }
}

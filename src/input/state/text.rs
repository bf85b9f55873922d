use crate::draw::SurfaceError;
use crate::util::Point;
use log::debug;

use super::{DrawingState, InputState};

/// What committing the open text edit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCommit {
    /// The text was stamped onto the board
    Stamped,
    /// The edit was empty after trimming and was discarded
    Cancelled,
    /// No text edit was open
    NotEditing,
}

impl InputState {
    /// Opens a text edit at `position`, replacing any edit already open.
    pub fn open_text_edit(&mut self, position: Point) {
        debug!("Text edit opened at ({:.0}, {:.0})", position.x, position.y);
        self.state = DrawingState::TextInput {
            position,
            content: String::new(),
        };
        self.needs_redraw = true;
    }

    /// Replaces the content of the open text edit. Ignored when no edit is open.
    pub fn set_text(&mut self, text: &str) {
        if let DrawingState::TextInput { content, .. } = &mut self.state {
            content.clear();
            content.push_str(text);
        }
    }

    /// Discards the open text edit without touching the board.
    pub fn cancel_text(&mut self) {
        if matches!(self.state, DrawingState::TextInput { .. }) {
            self.state = DrawingState::Idle;
            self.needs_redraw = true;
        }
    }

    /// Commits the open text edit.
    ///
    /// Whitespace-only text behaves like [`InputState::cancel_text`]: no history
    /// capture and no pixel changes. Otherwise the pre-edit state is captured, the
    /// board grows by one step on each axis the text would overflow (no scroll
    /// compensation), and the trimmed text is stamped with its baseline at the
    /// edit position.
    ///
    /// If the board cannot grow, the text is stamped clipped to the current bounds.
    ///
    /// # Errors
    /// Text measurement failed; nothing was captured or stamped. The edit is
    /// closed either way.
    pub fn commit_text(&mut self) -> Result<TextCommit, SurfaceError> {
        let (position, content) = match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::TextInput { position, content } => (position, content),
            other => {
                self.state = other;
                return Ok(TextCommit::NotEditing);
            }
        };
        self.needs_redraw = true;

        let text = content.trim();
        if text.is_empty() {
            debug!("Empty text edit discarded");
            return Ok(TextCommit::Cancelled);
        }

        let pixel_size = self.text_pixel_size();
        let text_width = self.surface.measure_text(text, &self.font, pixel_size)?;

        self.settle_pending_load();
        self.capture_history();

        // Height is approximated by the font's pixel size
        if let Some(growth) =
            self.growth
                .for_text(position, text_width, pixel_size, self.surface.size())
        {
            self.apply_growth(growth, false);
        }

        self.surface
            .stamp_text(position, text, &self.font, pixel_size, self.tool.color);
        Ok(TextCommit::Stamped)
    }

    /// Opens a text edit at `position`, fills it with `text` and commits it.
    pub fn insert_text(&mut self, position: Point, text: &str) -> Result<TextCommit, SurfaceError> {
        self.open_text_edit(position);
        self.set_text(text);
        self.commit_text()
    }
}

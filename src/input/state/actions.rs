use crate::broadcast::RemoteEvent;
use crate::draw::{Snapshot, SurfaceError};
use crate::export::{self, ExportConfig, ExportError};
use crate::history::{HistoryStep, LoadOutcome, LoadTicket};
use log::{debug, info};
use std::path::PathBuf;

use super::{DrawingState, InputState};

impl InputState {
    /// Steps back one edit.
    ///
    /// The target snapshot is decoded immediately but only written to the board
    /// at [`InputState::complete_load`] (or the next edit). Returns
    /// [`HistoryStep::Empty`] when there is nothing to undo.
    ///
    /// # Errors
    /// The snapshot could not be decoded; nothing changed.
    pub fn undo(&mut self) -> Result<HistoryStep, SurfaceError> {
        let step = self.history.undo(&self.surface)?;
        if let HistoryStep::Scheduled(ticket) = step {
            debug!(
                "Undo scheduled ({:?}), {} left",
                ticket,
                self.history.undo_len()
            );
        }
        Ok(step)
    }

    /// Re-applies the last undone edit. Mirror of [`InputState::undo`].
    pub fn redo(&mut self) -> Result<HistoryStep, SurfaceError> {
        let step = self.history.redo(&self.surface)?;
        if let HistoryStep::Scheduled(ticket) = step {
            debug!(
                "Redo scheduled ({:?}), {} left",
                ticket,
                self.history.redo_len()
            );
        }
        Ok(step)
    }

    /// Completion point of an undo/redo load.
    pub fn complete_load(&mut self, ticket: LoadTicket) -> Result<LoadOutcome, SurfaceError> {
        let outcome = self.history.complete_load(&mut self.surface, ticket)?;
        if outcome == LoadOutcome::Applied {
            self.needs_redraw = true;
        }
        Ok(outcome)
    }

    /// Applies whichever undo/redo load is in flight. Returns `false` if none was.
    pub fn finish_pending_load(&mut self) -> Result<bool, SurfaceError> {
        let applied = self.history.finish_pending(&mut self.surface)?;
        if applied {
            self.needs_redraw = true;
        }
        Ok(applied)
    }

    /// Wipes the whole board to transparent. Undoable; also clears the shared board.
    pub fn clear_canvas(&mut self) {
        if matches!(self.state, DrawingState::Drawing { .. }) {
            self.state = DrawingState::Idle;
        }
        self.settle_pending_load();
        self.capture_history();
        self.surface.clear();
        self.publish(RemoteEvent::Clear);
        self.needs_redraw = true;
        info!("Board cleared");
    }

    /// Encodes the logical board state (pending loads applied first).
    pub fn snapshot(&mut self) -> Result<Snapshot, SurfaceError> {
        self.finish_pending_load()?;
        self.surface.export_snapshot()
    }

    /// Saves the board as a PNG according to `config`. Returns the written path.
    pub fn export_png(&mut self, config: &ExportConfig) -> Result<PathBuf, ExportError> {
        let snapshot = self.snapshot()?;
        export::save_png(snapshot.as_png(), config)
    }

    /// Replays events from other participants. Returns how many were applied.
    pub fn sync_remote(&mut self) -> usize {
        let Some(channel) = self.channel.as_mut() else {
            return 0;
        };
        let events = channel.drain();
        if events.is_empty() {
            return 0;
        }

        self.settle_pending_load();
        for envelope in &events {
            self.remote.apply(&mut self.surface, envelope);
        }
        debug!(
            "Applied {} shared board events, {} participants mid-stroke",
            events.len(),
            self.remote.active_strokes()
        );
        self.needs_redraw = true;
        events.len()
    }
}

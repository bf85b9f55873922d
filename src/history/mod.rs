//! Bounded snapshot history with undo/redo.
//!
//! The store keeps two stacks of full-surface [`Snapshot`]s. [`HistoryStore::capture`]
//! records the state *before* an edit and invalidates the redo lineage.
//! [`HistoryStore::undo`] and [`HistoryStore::redo`] move snapshots between the
//! stacks immediately but only schedule the pixel load: the decoded image is
//! applied when the caller reaches the completion point
//! ([`HistoryStore::complete_load`]). Only one load is ever in flight; a newer
//! undo/redo supersedes an unfinished one instead of queueing behind it.

use crate::draw::snapshot::DecodedSnapshot;
use crate::draw::{RasterSurface, Snapshot, SurfaceError};
use log::debug;
use std::collections::VecDeque;

/// Default number of snapshots kept on the undo stack.
pub const DEFAULT_CAPACITY: usize = 50;

/// Identifies one scheduled history load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// Result of an undo/redo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStep {
    /// A load was scheduled; apply it with [`HistoryStore::complete_load`].
    Scheduled(LoadTicket),
    /// The relevant stack was empty; nothing changed.
    Empty,
}

/// Result of completing a scheduled load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The snapshot was written to the surface.
    Applied,
    /// A newer undo/redo replaced this load (or it was already applied).
    Superseded,
}

struct PendingLoad {
    ticket: LoadTicket,
    target: Snapshot,
    decoded: DecodedSnapshot,
}

/// Undo/redo stacks of full-surface snapshots.
pub struct HistoryStore {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    capacity: usize,
    pending: Option<PendingLoad>,
    next_ticket: u64,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HistoryStore {
    /// Creates an empty store keeping at most `capacity` undo snapshots (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            capacity: capacity.max(1),
            pending: None,
            next_ticket: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Ticket of the load currently waiting for completion, if any.
    pub fn pending_ticket(&self) -> Option<LoadTicket> {
        self.pending.as_ref().map(|pending| pending.ticket)
    }

    /// Records the current state ahead of an edit and clears the redo stack.
    pub fn capture(&mut self, surface: &RasterSurface) -> Result<(), SurfaceError> {
        let snapshot = self.live_snapshot(surface)?;
        self.capture_snapshot(snapshot);
        Ok(())
    }

    /// Pushes an already encoded snapshot as if it had just been captured.
    pub fn capture_snapshot(&mut self, snapshot: Snapshot) {
        self.push_undo(snapshot);
        if !self.redo.is_empty() {
            debug!("Discarding {} redo snapshot(s) after new edit", self.redo.len());
            self.redo.clear();
        }
    }

    /// Steps back one snapshot. The live state moves onto the redo stack.
    pub fn undo(&mut self, surface: &RasterSurface) -> Result<HistoryStep, SurfaceError> {
        let Some(target) = self.undo.back().cloned() else {
            return Ok(HistoryStep::Empty);
        };
        let decoded = target.decode()?;
        let live = self.live_snapshot(surface)?;

        self.undo.pop_back();
        self.redo.push(live);
        Ok(HistoryStep::Scheduled(self.schedule(target, decoded)))
    }

    /// Steps forward one snapshot. The live state moves onto the undo stack.
    pub fn redo(&mut self, surface: &RasterSurface) -> Result<HistoryStep, SurfaceError> {
        let Some(target) = self.redo.last().cloned() else {
            return Ok(HistoryStep::Empty);
        };
        let decoded = target.decode()?;
        let live = self.live_snapshot(surface)?;

        self.redo.pop();
        self.push_undo(live);
        Ok(HistoryStep::Scheduled(self.schedule(target, decoded)))
    }

    /// Applies the load identified by `ticket` to `surface`.
    ///
    /// The surface is replaced in one step, so callers never observe a cleared
    /// buffer without the snapshot drawn on it. If applying fails the load stays
    /// pending and the surface is unchanged.
    pub fn complete_load(
        &mut self,
        surface: &mut RasterSurface,
        ticket: LoadTicket,
    ) -> Result<LoadOutcome, SurfaceError> {
        match self.pending.take() {
            Some(pending) if pending.ticket == ticket => {
                if let Err(err) = surface.apply_decoded(&pending.decoded) {
                    self.pending = Some(pending);
                    return Err(err);
                }
                Ok(LoadOutcome::Applied)
            }
            other => {
                self.pending = other;
                debug!("History load {:?} was superseded", ticket);
                Ok(LoadOutcome::Superseded)
            }
        }
    }

    /// Applies whatever load is pending. Returns `false` when nothing was pending.
    pub fn finish_pending(&mut self, surface: &mut RasterSurface) -> Result<bool, SurfaceError> {
        match self.pending_ticket() {
            Some(ticket) => {
                self.complete_load(surface, ticket)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drops both stacks and any pending load.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.pending = None;
    }

    /// Current logical state: the pending load's target if one is in flight,
    /// otherwise the surface itself.
    fn live_snapshot(&self, surface: &RasterSurface) -> Result<Snapshot, SurfaceError> {
        match &self.pending {
            Some(pending) => Ok(pending.target.clone()),
            None => surface.export_snapshot(),
        }
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo.push_back(snapshot);
        while self.undo.len() > self.capacity {
            self.undo.pop_front();
            debug!("History full ({}), evicted oldest snapshot", self.capacity);
        }
    }

    fn schedule(&mut self, target: Snapshot, decoded: DecodedSnapshot) -> LoadTicket {
        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        if let Some(previous) = self.pending.replace(PendingLoad {
            ticket,
            target,
            decoded,
        }) {
            debug!("History load {:?} superseded by {:?}", previous.ticket, ticket);
        }
        ticket
    }
}

#[cfg(test)]
mod tests;

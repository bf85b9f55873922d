//! In-process hub: every client of a [`LocalHub`] sees what the others publish.
//!
//! The hub also keeps every event published since the last clear, so a
//! participant joining mid-session starts from the current board.

use super::{BroadcastError, Envelope, RemoteEvent, StrokeChannel};
use crate::config::BroadcastConfig;
use log::{debug, warn};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// Shared room for a set of participants.
#[derive(Debug, Clone)]
pub struct LocalHub {
    tx: broadcast::Sender<String>,
    records: Arc<Mutex<Vec<String>>>,
}

impl LocalHub {
    /// Creates a hub buffering at most `capacity` live events per slow receiver.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn from_config(config: &BroadcastConfig) -> Self {
        Self::new(config.channel_capacity)
    }

    /// Adds a participant. Its first [`StrokeChannel::drain`] returns every event
    /// stored since the last clear, followed by live ones.
    pub fn join(&self, participant: impl Into<String>) -> HubClient {
        let participant = participant.into();
        // Subscribing under the lock keeps a concurrent publish out of both the
        // backlog and the live queue
        let records = lock(&self.records);
        let rx = self.tx.subscribe();
        let backlog: VecDeque<String> = records.iter().cloned().collect();
        drop(records);

        debug!(
            "Participant '{}' joined shared board ({} participants, {} stored events)",
            participant,
            self.participant_count(),
            backlog.len()
        );
        HubClient {
            participant,
            tx: self.tx.clone(),
            rx,
            records: Arc::clone(&self.records),
            backlog,
        }
    }

    pub fn participant_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

fn lock(records: &Mutex<Vec<String>>) -> MutexGuard<'_, Vec<String>> {
    records.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One participant's end of a [`LocalHub`].
#[derive(Debug)]
pub struct HubClient {
    participant: String,
    tx: broadcast::Sender<String>,
    rx: broadcast::Receiver<String>,
    records: Arc<Mutex<Vec<String>>>,
    backlog: VecDeque<String>,
}

impl HubClient {
    fn accept(&self, text: &str, events: &mut Vec<Envelope>) {
        match Envelope::decode(text) {
            // Don't echo back to sender
            Ok(envelope) if envelope.participant == self.participant => {}
            Ok(envelope) => events.push(envelope),
            Err(err) => warn!("Dropping broadcast message: {}", err),
        }
    }
}

impl StrokeChannel for HubClient {
    fn participant(&self) -> &str {
        &self.participant
    }

    fn publish(&mut self, event: RemoteEvent) -> Result<(), BroadcastError> {
        let clears = event == RemoteEvent::Clear;
        let message = Envelope::new(self.participant.clone(), event).encode()?;

        let mut records = lock(&self.records);
        if clears {
            debug!("Dropping {} stored events after clear", records.len());
            records.clear();
        } else {
            records.push(message.clone());
        }
        // Our own receiver keeps the channel open, so this only fails once the hub is gone.
        self.tx
            .send(message)
            .map(|_| ())
            .map_err(|_| BroadcastError::Closed)
    }

    fn drain(&mut self) -> Vec<Envelope> {
        let mut events = Vec::new();
        while let Some(text) = self.backlog.pop_front() {
            self.accept(&text, &mut events);
        }
        loop {
            match self.rx.try_recv() {
                Ok(text) => self.accept(&text, &mut events),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(
                        "Shared board fell behind, {} events from other participants were dropped",
                        skipped
                    );
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        events
    }
}

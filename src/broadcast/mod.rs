//! Shared-board stroke broadcasting.
//!
//! Every brush point drawn locally is pushed to a shared channel as a small
//! `{x, y, color}` record; records from other participants are replayed as line
//! segments. Delivery is best effort: there is no ordering guarantee across
//! participants and no conflict resolution.

mod local;
mod remote;

pub use local::{HubClient, LocalHub};
pub use remote::RemoteReplay;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One event on the shared channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RemoteEvent {
    /// A committed brush point in surface coordinates
    Point { x: f64, y: f64, color: String },
    /// The participant lifted the pen
    StrokeEnd,
    /// The participant cleared the board
    Clear,
}

impl RemoteEvent {
    pub fn point(x: f64, y: f64, color: impl Into<String>) -> Self {
        Self::Point {
            x,
            y,
            color: color.into(),
        }
    }
}

/// An event tagged with the participant that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub participant: String,
    pub event: RemoteEvent,
}

impl Envelope {
    pub fn new(participant: impl Into<String>, event: RemoteEvent) -> Self {
        Self {
            participant: participant.into(),
            event,
        }
    }

    /// Wire form of the envelope.
    pub fn encode(&self) -> Result<String, BroadcastError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(text: &str) -> Result<Self, BroadcastError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("Malformed broadcast message: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("Broadcast channel closed")]
    Closed,
}

/// Transport for shared-board events.
pub trait StrokeChannel {
    /// Identifier this end publishes under.
    fn participant(&self) -> &str;

    /// Pushes a local event to every other participant.
    fn publish(&mut self, event: RemoteEvent) -> Result<(), BroadcastError>;

    /// Returns events from other participants received since the last call.
    fn drain(&mut self) -> Vec<Envelope>;
}

//! Entities of the chat relay.

use super::value_object::{DisplayName, SessionId, Timestamp};

/// A registered chat participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Session identity
    pub id: SessionId,
    /// Name chosen at handshake, immutable afterwards
    pub name: DisplayName,
    /// When the handshake completed
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(id: SessionId, name: DisplayName, joined_at: Timestamp) -> Self {
        Self {
            id,
            name,
            joined_at,
        }
    }
}

/// One attributable message in the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub timestamp: Timestamp,
    pub sender: DisplayName,
    /// Message text including its trailing line terminator
    pub text: String,
}

impl HistoryRecord {
    pub fn new(timestamp: Timestamp, sender: DisplayName, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            sender,
            text: text.into(),
        }
    }

    /// Render the record as it appears on the wire: `[timestamp][sender]: text`
    pub fn render(&self) -> String {
        format!("[{}][{}]: {}", self.timestamp, self.sender, self.text)
    }
}

/// Consistent view of the registry and the history taken under the hub lock
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomSnapshot {
    /// Participants in registration order
    pub participants: Vec<Participant>,
    /// History records in append order
    pub history: Vec<HistoryRecord>,
}

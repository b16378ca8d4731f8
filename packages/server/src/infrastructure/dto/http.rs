//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Snapshot of the relay: who is connected and what has been said
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshotDto {
    pub participants: Vec<ParticipantDto>,
    pub history: Vec<HistoryRecordDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub session_id: u64,
    pub name: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub joined_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecordDto {
    /// `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    pub sender: String,
    /// Message text including its line terminator
    pub message: String,
}

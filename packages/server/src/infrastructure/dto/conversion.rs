//! Conversion logic between domain entities and DTOs.

use crate::domain::{HistoryRecord, Participant, RoomSnapshot};
use crate::infrastructure::dto::http as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Participant> for dto::ParticipantDto {
    fn from(model: Participant) -> Self {
        Self {
            session_id: model.id.value(),
            name: model.name.into_string(),
            joined_at: model.joined_at.to_string(),
        }
    }
}

impl From<HistoryRecord> for dto::HistoryRecordDto {
    fn from(model: HistoryRecord) -> Self {
        Self {
            timestamp: model.timestamp.to_string(),
            sender: model.sender.into_string(),
            message: model.text,
        }
    }
}

impl From<RoomSnapshot> for dto::RoomSnapshotDto {
    fn from(model: RoomSnapshot) -> Self {
        Self {
            participants: model.participants.into_iter().map(Into::into).collect(),
            history: model.history.into_iter().map(Into::into).collect(),
        }
    }
}

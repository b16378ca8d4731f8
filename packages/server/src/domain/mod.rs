//! Domain layer: value objects, entities and the seams the relay depends on.

pub mod entity;
pub mod history;
pub mod message;
pub mod pusher;
pub mod registry;
pub mod value_object;

pub use entity::{HistoryRecord, Participant, RoomSnapshot};
pub use history::HistoryLog;
pub use message::Broadcast;
pub use pusher::{MessagePusher, PushError};
pub use registry::{RegistryEntry, SessionRegistry};
pub use value_object::{DisplayName, SessionId, Timestamp};

#[cfg(test)]
pub use pusher::MockMessagePusher;

//! Infrastructure layer: stream I/O and DTOs.

pub mod dto;
pub mod line_reader;
pub mod message_pusher;

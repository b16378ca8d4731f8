//! Data Transfer Objects (DTOs) for the status HTTP API.

pub mod conversion;
pub mod http;

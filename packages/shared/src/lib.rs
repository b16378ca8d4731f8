//! Utilities shared by the Irori packages.

pub mod logger;
pub mod time;

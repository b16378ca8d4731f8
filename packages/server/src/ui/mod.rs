//! UI layer: TCP listener, per-connection session handler and status HTTP API.

pub mod handler;
mod server;
mod signal;

pub use server::{Server, StatusServer, status_router};
pub use signal::shutdown_signal;

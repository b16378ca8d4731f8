//! Error types for the relay server.

use thiserror::Error;

/// Errors raised while setting up or running the listeners
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listening address could not be bound (address in use, permission denied, ...)
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Other I/O failure on a listening socket
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

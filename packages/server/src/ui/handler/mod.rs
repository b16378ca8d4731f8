//! Connection and request handlers.

pub mod http;
pub mod tcp;

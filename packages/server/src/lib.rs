//! Line-oriented TCP chat relay library.
//!
//! Clients connect over TCP, choose a display name and exchange
//! newline-terminated messages that are broadcast to every connected peer.
//! Newcomers receive the running transcript before any live traffic.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
pub mod error;

#[cfg(test)]
mod test_support;

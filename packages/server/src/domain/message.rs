//! Messages handed to the broadcast engine.

use super::{entity::Participant, value_object::DisplayName};

/// A message to deliver to every registered participant
///
/// Only `Attributed` messages are recorded in the history log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Broadcast {
    /// Chat line sent by a participant; `text` keeps its line terminator
    Attributed { sender: Participant, text: String },
    /// Server notice delivered verbatim (join / leave announcements)
    SystemNotice { text: String },
}

impl Broadcast {
    pub fn attributed(sender: &Participant, text: impl Into<String>) -> Self {
        Self::Attributed {
            sender: sender.clone(),
            text: text.into(),
        }
    }

    /// `<name> has joined the chat...\n`
    pub fn joined(name: &DisplayName) -> Self {
        Self::SystemNotice {
            text: format!("{} has joined the chat...\n", name),
        }
    }

    /// `<name> has left the chat...\n`
    pub fn left(name: &DisplayName) -> Self {
        Self::SystemNotice {
            text: format!("{} has left the chat...\n", name),
        }
    }
}

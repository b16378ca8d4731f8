//! Helpers shared by unit tests.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::{MessagePusher, PushError};

/// MessagePusher that forwards every line to a channel
///
/// Closing drops the sender, so the receiving side observes `None` once the
/// pending lines are drained.
pub struct ChannelPusher {
    sender: Option<mpsc::UnboundedSender<String>>,
}

impl ChannelPusher {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { sender: Some(tx) }, rx)
    }
}

#[async_trait]
impl MessagePusher for ChannelPusher {
    async fn push(&mut self, line: &str) -> Result<(), PushError> {
        let sender = self.sender.as_ref().ok_or(PushError::Closed)?;
        sender
            .send(line.to_string())
            .map_err(|_| PushError::Closed)
    }

    async fn close(&mut self) {
        self.sender = None;
    }
}

/// Drain everything currently queued on `rx` without waiting
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
    let mut lines = Vec::new();
    while let Ok(line) = rx.try_recv() {
        lines.push(line);
    }
    lines
}

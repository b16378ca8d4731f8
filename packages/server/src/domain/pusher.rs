//! MessagePusher trait 定義
//!
//! 参加者へ 1 行を書き出すための抽象。ドメイン層がインターフェースを定義し、
//! 具体的な実装（TCP ストリームなど）は Infrastructure 層が提供します。

use async_trait::async_trait;
use thiserror::Error;

/// Delivery failure for a single recipient
#[derive(Debug, Error)]
pub enum PushError {
    /// The outbound side was already closed
    #[error("Connection already closed")]
    Closed,

    /// Writing to the underlying stream failed
    #[error("Failed to write to connection: {0}")]
    Io(#[from] std::io::Error),
}

/// Outbound side of one connection
///
/// The hub owns one pusher per registered participant and only calls it while
/// holding its lock, so implementations never see concurrent writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send {
    /// Write `line` to the peer exactly as given
    async fn push(&mut self, line: &str) -> Result<(), PushError>;

    /// Close the outbound side. Calling it again has no effect.
    async fn close(&mut self);
}

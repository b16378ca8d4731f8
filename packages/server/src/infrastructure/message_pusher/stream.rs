//! ストリームを使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続の書き込み側（`OwnedWriteHalf` など）を保持
//! - 1 行ずつ書き込み、flush する
//! - 切断処理時に書き込み側を shutdown する
//!
//! ## 設計ノート
//!
//! 読み込み側はセッションハンドラが保持し、書き込み側はこの実装を通じて
//! ハブのレジストリが保持します。

use async_trait::async_trait;
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    net::tcp::OwnedWriteHalf,
};

use crate::domain::{MessagePusher, PushError};

/// Pusher over the write half of a TCP connection
pub type TcpPusher = StreamPusher<OwnedWriteHalf>;

/// MessagePusher backed by any async writer
pub struct StreamPusher<W> {
    writer: W,
    closed: bool,
}

impl<W> StreamPusher<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            closed: false,
        }
    }

    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W> MessagePusher for StreamPusher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn push(&mut self, line: &str) -> Result<(), PushError> {
        if self.closed {
            return Err(PushError::Closed);
        }
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.writer.shutdown().await {
            tracing::debug!("Failed to shut down connection cleanly: {}", e);
        }
    }
}

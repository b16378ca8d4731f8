//! メッセージ送信（通知）の実装
//!
//! - `stream`: 任意の `AsyncWrite`（TCP の書き込み側など）を使った実装

pub mod stream;

pub use stream::{StreamPusher, TcpPusher};

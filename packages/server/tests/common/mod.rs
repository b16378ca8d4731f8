//! Shared helpers for the integration tests: an in-process relay and a
//! line-oriented TCP client.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use irori_server::{
    config::ServerConfig,
    ui::{Server, StatusServer, handler::tcp::NAME_PROMPT},
    usecase::ChatHub,
};
use tokio::{
    io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    time::timeout,
};

/// How long a client waits for an expected line
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);
/// How long a client waits to conclude that nothing arrives
pub const SILENCE: Duration = Duration::from_millis(200);

/// Start a relay on an ephemeral loopback port
pub async fn start_server() -> (SocketAddr, Arc<ChatHub>) {
    start_server_with(ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    })
    .await
}

pub async fn start_server_with(config: ServerConfig) -> (SocketAddr, Arc<ChatHub>) {
    let hub = Arc::new(ChatHub::new(config.history_limit));
    let server = Server::bind(&config, hub.clone())
        .await
        .expect("Failed to bind test server");
    let addr = server.local_addr();
    tokio::spawn(server.run_until(std::future::pending()));
    (addr, hub)
}

/// Start the status API for `hub` on an ephemeral loopback port
pub async fn start_status_server(hub: Arc<ChatHub>) -> SocketAddr {
    let status = StatusServer::bind("127.0.0.1:0", hub)
        .await
        .expect("Failed to bind status server");
    let addr = status.local_addr();
    tokio::spawn(status.run_until(std::future::pending()));
    addr
}

/// Wait until the hub reports `expected` participants
pub async fn wait_for_participants(hub: &ChatHub, expected: usize) {
    timeout(READ_TIMEOUT, async {
        while hub.participant_count().await != expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("participant count never reached the expected value");
}

/// Raw chat client
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    /// Connect without performing the handshake
    pub async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr)
            .await
            .expect("Failed to connect to test server");
        let (read_half, write_half) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer: write_half,
        }
    }

    /// Connect, answer the name prompt and consume the own join notice
    pub async fn join(addr: SocketAddr, name: &str) -> Self {
        let mut client = Self::connect(addr).await;
        client.read_prompt().await;
        client.send_line(name).await;
        assert_eq!(
            client.read_line().await,
            format!("{name} has joined the chat...\n")
        );
        client
    }

    /// Read the name prompt, which has no line terminator
    pub async fn read_prompt(&mut self) {
        let mut buf = vec![0u8; NAME_PROMPT.len()];
        timeout(READ_TIMEOUT, self.reader.read_exact(&mut buf))
            .await
            .expect("timed out waiting for the name prompt")
            .expect("Failed to read the name prompt");
        assert_eq!(buf, NAME_PROMPT.as_bytes());
    }

    /// Send `text` followed by `\n`
    pub async fn send_line(&mut self, text: &str) {
        self.send_raw(format!("{text}\n").as_bytes()).await;
    }

    pub async fn send_raw(&mut self, bytes: &[u8]) {
        self.writer
            .write_all(bytes)
            .await
            .expect("Failed to write to test server");
    }

    /// Read one line including its terminator; panics on EOF or timeout
    pub async fn read_line(&mut self) -> String {
        let line = self
            .try_read_line(READ_TIMEOUT)
            .await
            .expect("timed out waiting for a line");
        assert!(!line.is_empty(), "connection closed while waiting for a line");
        line
    }

    /// Read one line, `None` on timeout, empty string on EOF
    pub async fn try_read_line(&mut self, wait: Duration) -> Option<String> {
        let mut line = String::new();
        match timeout(wait, self.reader.read_line(&mut line)).await {
            Ok(result) => {
                result.expect("Failed to read from test server");
                Some(line)
            }
            Err(_) => None,
        }
    }

    /// Assert that nothing arrives for a short while
    pub async fn expect_silence(&mut self) {
        if let Some(line) = self.try_read_line(SILENCE).await {
            panic!("expected silence, got {line:?}");
        }
    }

    /// Assert that the server closes the connection
    pub async fn expect_eof(&mut self) {
        let line = self
            .try_read_line(READ_TIMEOUT)
            .await
            .expect("timed out waiting for EOF");
        assert_eq!(line, "", "expected EOF");
    }

    /// Half-close the write side so the server sees EOF
    pub async fn shutdown_write(&mut self) {
        self.writer
            .shutdown()
            .await
            .expect("Failed to shut down write side");
    }
}

//! Server execution logic.

use std::{future::Future, io, net::SocketAddr, sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{Router, routing::get};
use tokio::net::{TcpListener, TcpStream};
use tower_http::trace::TraceLayer;

use crate::{config::ServerConfig, error::ServerError, usecase::ChatHub};

use super::{
    handler::{
        http::{get_room, health_check},
        tcp::handle_connection,
    },
    signal::shutdown_signal,
};

/// Pause after a failed accept so a persistent error (e.g. fd exhaustion) does not spin
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Source of inbound connections for the accept loop
#[async_trait]
trait Acceptor: Send {
    async fn accept(&mut self) -> io::Result<(TcpStream, SocketAddr)>;
}

#[async_trait]
impl Acceptor for TcpListener {
    async fn accept(&mut self) -> io::Result<(TcpStream, SocketAddr)> {
        TcpListener::accept(self).await
    }
}

/// TCP chat relay listener
///
/// Owns the bound listening socket and a handle to the shared hub.
///
/// # Example
///
/// ```ignore
/// let hub = Arc::new(ChatHub::new(None));
/// let server = Server::bind(&ServerConfig::default(), hub).await?;
/// server.run().await;
/// ```
pub struct Server {
    /// ChatHub（レジストリと履歴を保持する共有集約）
    hub: Arc<ChatHub>,
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl Server {
    /// Bind the chat listener
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Bind` if the address cannot be bound.
    pub async fn bind(config: &ServerConfig, hub: Arc<ChatHub>) -> Result<Self, ServerError> {
        let bind_addr = config.bind_addr();
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Chat relay listening on {}", local_addr);

        Ok(Self {
            hub,
            listener,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept connections until Ctrl+C
    pub async fn run(self) {
        tracing::info!("Press Ctrl+C to shutdown gracefully");
        self.run_until(shutdown_signal()).await;
    }

    /// Accept connections until `shutdown` resolves
    ///
    /// Every accepted connection gets its own task; the loop never waits on a
    /// client. Accept errors are logged and the loop keeps going.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let Self { hub, mut listener, .. } = self;
        accept_loop(&mut listener, hub, shutdown).await;
        tracing::info!("Server shutdown complete");
    }
}

async fn accept_loop<A, F>(acceptor: &mut A, hub: Arc<ChatHub>, shutdown: F)
where
    A: Acceptor,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            accepted = acceptor.accept() => match accepted {
                Ok((stream, peer)) => {
                    tracing::debug!("Accepted connection from {}", peer);
                    tokio::spawn(handle_connection(hub.clone(), stream, peer));
                }
                Err(e) => {
                    tracing::warn!("Failed to accept connection: {}", e);
                    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                }
            },
        }
    }
}

/// Routes of the read-only status API
pub fn status_router(hub: Arc<ChatHub>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/room", get(get_room))
        .layer(TraceLayer::new_for_http())
        .with_state(hub)
}

/// Read-only HTTP status endpoint
pub struct StatusServer {
    hub: Arc<ChatHub>,
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl StatusServer {
    pub async fn bind(addr: &str, hub: Arc<ChatHub>) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Status API listening on http://{}/api/room", local_addr);

        Ok(Self {
            hub,
            listener,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until `shutdown` resolves
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, status_router(self.hub))
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

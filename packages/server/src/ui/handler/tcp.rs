//! TCP connection handler: one chat session per accepted stream.
//!
//! A session walks through `Connecting -> Handshaking -> Active -> Closing -> Closed`.
//! Only sessions that complete the name handshake are registered with the hub,
//! and every registered session is deregistered exactly once, whichever way
//! its read loop ends.

use std::{net::SocketAddr, sync::Arc};

use tokio::{
    io::{AsyncBufRead, BufReader},
    net::TcpStream,
};

use crate::{
    domain::{Broadcast, DisplayName, MessagePusher, Participant, SessionId},
    infrastructure::{line_reader::read_complete_line, message_pusher::TcpPusher},
    usecase::ChatHub,
};

/// Prompt sent right after accept
pub const NAME_PROMPT: &str = "[ENTER YOUR NAME]: ";

/// Lifecycle of a single connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepted, nothing sent yet
    Connecting,
    /// Prompt sent, waiting for the name line
    Handshaking,
    /// Registered and relaying lines
    Active,
    /// Read loop finished, cleaning up
    Closing,
    Closed,
}

struct SessionTracker {
    id: SessionId,
    peer: String,
    state: SessionState,
}

impl SessionTracker {
    fn new(id: SessionId, peer: String) -> Self {
        Self {
            id,
            peer,
            state: SessionState::Connecting,
        }
    }

    fn transition(&mut self, next: SessionState) {
        tracing::debug!(
            "Session {} ({}): {:?} -> {:?}",
            self.id,
            self.peer,
            self.state,
            next
        );
        self.state = next;
    }
}

/// Deregisters a session when dropped without an explicit `leave`
///
/// Covers the handler future being dropped or panicking while the session is
/// registered. `ChatHub::leave` is idempotent, so a late second call is harmless.
struct LeaveGuard {
    hub: Arc<ChatHub>,
    id: SessionId,
    armed: bool,
}

impl LeaveGuard {
    fn new(hub: Arc<ChatHub>, id: SessionId) -> Self {
        Self {
            hub,
            id,
            armed: true,
        }
    }

    /// Run the cleanup on its own task so it completes even if the session
    /// future is dropped while the departure notice is being delivered.
    async fn leave(mut self) -> Option<Participant> {
        self.armed = false;
        let hub = self.hub.clone();
        let id = self.id;
        match tokio::spawn(async move { hub.leave(id).await }).await {
            Ok(left) => left,
            Err(e) => {
                tracing::warn!("Cleanup of session {} failed: {}", id, e);
                None
            }
        }
    }
}

impl Drop for LeaveGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let hub = self.hub.clone();
        let id = self.id;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    hub.leave(id).await;
                });
            }
            Err(_) => tracing::warn!("No runtime left to clean up session {}", id),
        }
    }
}

/// Run a chat session over an accepted TCP stream
pub async fn handle_connection(hub: Arc<ChatHub>, stream: TcpStream, peer: SocketAddr) {
    let (read_half, write_half) = stream.into_split();
    run_session(
        hub,
        BufReader::new(read_half),
        TcpPusher::new(write_half),
        peer.to_string(),
    )
    .await;
}

/// Drive one session to completion
///
/// # Returns
///
/// The participant the session registered as, or `None` if the peer left
/// before completing the handshake.
pub async fn run_session<R, P>(
    hub: Arc<ChatHub>,
    mut reader: R,
    mut pusher: P,
    peer: String,
) -> Option<Participant>
where
    R: AsyncBufRead + Unpin + Send,
    P: MessagePusher + 'static,
{
    let mut session = SessionTracker::new(hub.allocate_session_id(), peer);

    session.transition(SessionState::Handshaking);
    let Some(name) = handshake(&mut reader, &mut pusher, &session.peer).await else {
        session.transition(SessionState::Closing);
        pusher.close().await;
        session.transition(SessionState::Closed);
        return None;
    };

    let participant = Participant::new(session.id, name, hub.now());
    let guard = LeaveGuard::new(hub.clone(), participant.id);
    hub.join(participant.clone(), Box::new(pusher)).await;
    session.transition(SessionState::Active);
    tracing::info!(
        "Client '{}' connected (session {}, peer {})",
        participant.name,
        participant.id,
        session.peer
    );

    loop {
        match read_complete_line(&mut reader).await {
            Ok(Some(text)) => {
                hub.broadcast(Broadcast::attributed(&participant, text))
                    .await;
            }
            Ok(None) => {
                tracing::info!("Client '{}' disconnected", participant.name);
                break;
            }
            Err(e) => {
                tracing::info!("Client '{}' disconnected: {}", participant.name, e);
                break;
            }
        }
    }

    session.transition(SessionState::Closing);
    guard.leave().await;
    session.transition(SessionState::Closed);
    Some(participant)
}

/// Send the prompt and read the display name
async fn handshake<R, P>(reader: &mut R, pusher: &mut P, peer: &str) -> Option<DisplayName>
where
    R: AsyncBufRead + Unpin + Send,
    P: MessagePusher,
{
    if let Err(e) = pusher.push(NAME_PROMPT).await {
        tracing::info!("Peer {} gone before the name prompt: {}", peer, e);
        return None;
    }

    match read_complete_line(reader).await {
        Ok(Some(line)) => Some(DisplayName::from_handshake_line(&line)),
        Ok(None) => {
            tracing::info!("Peer {} disconnected before choosing a name", peer);
            None
        }
        Err(e) => {
            tracing::info!("Peer {} disconnected during handshake: {}", peer, e);
            None
        }
    }
}

//! Bidirectional realtime echo channel (`GET /ws/realtime`).
//!
//! One [`EchoSession`] per accepted connection. The session sends a single
//! handshake frame, then answers every inbound text frame with an
//! `echo_response` frame carrying the payload verbatim plus a server
//! timestamp. Strictly one reply per inbound frame, in arrival order.
//!
//! Faults and clean disconnects share one shutdown path: the loop exits, the
//! transport is closed exactly once, and nothing escapes the session. A
//! session failure is invisible to every other session.

use axum::extract::connect_info::ConnectInfo;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use finsec_core::clock;
use futures_util::sink::SinkExt;
use serde_json::json;
use std::net::SocketAddr;
use tracing::{info, warn};
use uuid::Uuid;

/// Lifecycle of one echo session. `Closed` is terminal; a dropped session is
/// discarded, never reconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Open,
    Closing,
    Closed,
}

/// One receive step, flattened into the cases the session loop handles.
pub(crate) enum Event {
    /// An inbound text frame to echo back.
    Text(String),
    /// A frame that gets no echo reply (binary, ping/pong).
    Ignored,
    /// Peer closed the connection. Not an error.
    Disconnected,
    /// Transport-level failure. Terminal for this session only.
    Fault(axum::Error),
}

/// Seam between the session loop and the websocket, so the loop is testable
/// without a live connection.
pub(crate) trait Transport {
    async fn next_event(&mut self) -> Event;
    async fn send_text(&mut self, frame: String) -> Result<(), axum::Error>;
    async fn close(&mut self);
}

/// `GET /ws/realtime` — upgrade to a websocket echo session.
pub async fn realtime_upgrade(
    ws: WebSocketUpgrade,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> Response {
    ws.on_upgrade(move |socket| handle_session(socket, peer))
}

async fn handle_session(socket: WebSocket, peer: SocketAddr) {
    let mut transport = WsTransport::new(socket);
    EchoSession::new(peer).run(&mut transport).await;
}

/// A single echo session: peer identity plus lifecycle state.
pub struct EchoSession {
    id: Uuid,
    peer: SocketAddr,
    state: SessionState,
}

impl EchoSession {
    pub fn new(peer: SocketAddr) -> Self {
        Self {
            id: Uuid::new_v4(),
            peer,
            state: SessionState::Connecting,
        }
    }

    /// Drive the session from accept to close.
    ///
    /// The transport is closed on every exit path; a close failure only
    /// means the peer is already gone, and nothing is sent over a broken
    /// connection.
    pub(crate) async fn run<T: Transport>(mut self, transport: &mut T) -> Self {
        self.state = SessionState::Open;
        info!(session = %self.id, peer = %self.peer, "Echo session connected");

        match transport.send_text(handshake_frame()).await {
            Ok(()) => self.message_loop(transport).await,
            Err(e) => warn!(session = %self.id, error = %e, "Handshake send failed"),
        }

        self.state = SessionState::Closing;
        transport.close().await;
        self.state = SessionState::Closed;
        info!(session = %self.id, peer = %self.peer, "Echo session closed");

        self
    }

    /// One reply per inbound text frame, in arrival order; the next frame is
    /// not awaited until the reply has been sent.
    async fn message_loop<T: Transport>(&mut self, transport: &mut T) {
        loop {
            match transport.next_event().await {
                Event::Text(payload) => {
                    let frame = echo_frame(&payload, &clock::now_stamp());
                    if let Err(e) = transport.send_text(frame).await {
                        warn!(session = %self.id, error = %e, "Echo send failed");
                        return;
                    }
                }
                Event::Ignored => {}
                Event::Disconnected => {
                    info!(session = %self.id, peer = %self.peer, "Peer disconnected");
                    return;
                }
                Event::Fault(e) => {
                    warn!(session = %self.id, error = %e, "Transport fault, terminating session");
                    return;
                }
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }
}

/// [`Transport`] over a live axum websocket.
struct WsTransport {
    socket: Option<WebSocket>,
}

impl WsTransport {
    fn new(socket: WebSocket) -> Self {
        Self {
            socket: Some(socket),
        }
    }
}

impl Transport for WsTransport {
    async fn next_event(&mut self) -> Event {
        let Some(socket) = self.socket.as_mut() else {
            return Event::Disconnected;
        };
        match socket.recv().await {
            Some(Ok(Message::Text(payload))) => Event::Text(payload.to_string()),
            Some(Ok(Message::Close(_))) | None => Event::Disconnected,
            Some(Ok(_)) => Event::Ignored,
            Some(Err(e)) => Event::Fault(e),
        }
    }

    async fn send_text(&mut self, frame: String) -> Result<(), axum::Error> {
        match self.socket.as_mut() {
            Some(socket) => socket.send(Message::Text(frame.into())).await,
            None => Ok(()),
        }
    }

    async fn close(&mut self) {
        // take() makes a second close attempt a no-op.
        if let Some(mut socket) = self.socket.take() {
            let _ = socket.close().await;
        }
    }
}

/// Handshake frame sent once when the session opens.
fn handshake_frame() -> String {
    json!({
        "status": "connected",
        "message": "Realtime echo channel established.",
    })
    .to_string()
}

/// Echo reply for one inbound payload.
fn echo_frame(received: &str, timestamp: &str) -> String {
    json!({
        "type": "echo_response",
        "received_data": received,
        "server_timestamp": timestamp,
        "message": "Echo of the received realtime data.",
    })
    .to_string()
}

// ── Tests ────────────────────────────────────────────────────────────────────

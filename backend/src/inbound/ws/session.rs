//! Per-connection notification socket.
//!
//! The session pings every 5s and closes after 10s without client traffic.
//! Tests shorten both intervals. Client text frames are treated as
//! keep-alives; the socket is push-only.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_ws::{CloseCode, CloseReason, Closed, Message, MessageStream, ProtocolError, Session};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time;
use tracing::{debug, warn};

use crate::domain::{Notification, OwnerId};
use crate::inbound::ws::messages::NotificationFrame;

/// Time between heartbeats to the client (5s in production, shorter in tests).
#[cfg(not(test))]
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
#[cfg(test)]
const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(50);

/// Max idle time before disconnecting the client (10s in production, shorter in tests).
#[cfg(not(test))]
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
#[cfg(test)]
const CLIENT_TIMEOUT: Duration = Duration::from_millis(100);

pub(super) async fn handle_ws_session(
    owner: OwnerId,
    notifications: broadcast::Receiver<Arc<Notification>>,
    session: Session,
    stream: MessageStream,
) {
    WsSession::new(owner, notifications)
        .run(session, stream)
        .await;
}

enum SessionError {
    ClientClosed(Option<CloseReason>),
    StreamClosed,
    HeartbeatTimeout,
    HubClosed,
    Protocol(ProtocolError),
    Network(Closed),
}

enum CloseAction {
    None,
    Close(Option<CloseReason>),
}

struct WsSession {
    owner: OwnerId,
    notifications: broadcast::Receiver<Arc<Notification>>,
}

impl WsSession {
    fn new(owner: OwnerId, notifications: broadcast::Receiver<Arc<Notification>>) -> Self {
        Self {
            owner,
            notifications,
        }
    }

    async fn run(mut self, mut session: Session, mut stream: MessageStream) {
        let mut last_heartbeat = Instant::now();
        let mut heartbeat = time::interval(HEARTBEAT_INTERVAL);
        debug!(owner = %self.owner, "notification socket opened");

        loop {
            let result = tokio::select! {
                _ = heartbeat.tick() => {
                    handle_heartbeat_tick(&mut session, &last_heartbeat).await
                }
                message = stream.recv() => {
                    handle_stream_message(&mut session, &mut last_heartbeat, message).await
                }
                pushed = self.notifications.recv() => {
                    self.handle_pushed(&mut session, pushed).await
                }
            };

            if let Err(error) = result {
                self.log_shutdown_reason(&error);
                close_session_if_needed(session, close_action_for(error)).await;
                return;
            }
        }
    }

    async fn handle_pushed(
        &self,
        session: &mut Session,
        pushed: Result<Arc<Notification>, RecvError>,
    ) -> Result<(), SessionError> {
        match pushed {
            Ok(notification) => send_json(session, &NotificationFrame::from(&*notification))
                .await
                .map_err(SessionError::Network),
            Err(RecvError::Lagged(skipped)) => {
                warn!(owner = %self.owner, skipped, "notification socket lagged");
                Ok(())
            }
            Err(RecvError::Closed) => Err(SessionError::HubClosed),
        }
    }

    fn log_shutdown_reason(&self, error: &SessionError) {
        match error {
            SessionError::HeartbeatTimeout => {
                warn!(owner = %self.owner, "WebSocket heartbeat timeout; closing connection");
            }
            SessionError::Protocol(error) => {
                warn!(owner = %self.owner, error = %error, "WebSocket protocol error");
            }
            SessionError::Network(error) => {
                warn!(owner = %self.owner, error = %error, "WebSocket send failed; closing connection");
            }
            SessionError::HubClosed => {
                debug!(owner = %self.owner, "notification hub closed");
            }
            SessionError::ClientClosed(_) | SessionError::StreamClosed => {
                debug!(owner = %self.owner, "notification socket closed by client");
            }
        }
    }
}

async fn handle_heartbeat_tick(
    session: &mut Session,
    last_heartbeat: &Instant,
) -> Result<(), SessionError> {
    if Instant::now().duration_since(*last_heartbeat) > CLIENT_TIMEOUT {
        return Err(SessionError::HeartbeatTimeout);
    }

    session.ping(b"").await.map_err(SessionError::Network)
}

async fn handle_stream_message(
    session: &mut Session,
    last_heartbeat: &mut Instant,
    message: Option<Result<Message, ProtocolError>>,
) -> Result<(), SessionError> {
    let Some(message) = message else {
        return Err(SessionError::StreamClosed);
    };

    match message {
        Ok(Message::Ping(payload)) => {
            *last_heartbeat = Instant::now();
            session.pong(&payload).await.map_err(SessionError::Network)
        }
        Ok(Message::Close(reason)) => Err(SessionError::ClientClosed(reason)),
        Ok(
            Message::Text(_)
            | Message::Pong(_)
            | Message::Binary(_)
            | Message::Continuation(_)
            | Message::Nop,
        ) => {
            *last_heartbeat = Instant::now();
            Ok(())
        }
        Err(error) => Err(SessionError::Protocol(error)),
    }
}

async fn send_json<T: serde::Serialize>(session: &mut Session, payload: &T) -> Result<(), Closed> {
    match serde_json::to_string(payload) {
        Ok(body) => session.text(body).await,
        Err(error) => {
            warn!(error = %error, "Failed to serialize WebSocket payload");
            Ok(())
        }
    }
}

fn close_action_for(error: SessionError) -> CloseAction {
    match error {
        SessionError::HeartbeatTimeout => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Normal,
            description: Some("heartbeat timeout".to_owned()),
        })),
        SessionError::Protocol(_) => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Protocol,
            description: Some("protocol error".to_owned()),
        })),
        SessionError::HubClosed => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Away,
            description: Some("server shutting down".to_owned()),
        })),
        SessionError::ClientClosed(reason) => CloseAction::Close(reason),
        SessionError::StreamClosed | SessionError::Network(_) => CloseAction::None,
    }
}

async fn close_session_if_needed(session: Session, close_action: CloseAction) {
    if let CloseAction::Close(reason) = close_action
        && let Err(error) = session.close(reason).await
    {
        warn!(error = %error, "Failed to close WebSocket session");
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

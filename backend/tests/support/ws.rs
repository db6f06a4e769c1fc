//! WebSocket-focused test helpers.

use std::sync::Arc;

use habitwise::inbound::ws::NotificationHub;
use habitwise::inbound::ws::state::WsState;
use habitwise::outbound::identity::DevIdentityVerifier;

/// Origin every socket test is allowed to connect from.
pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Build a `WsState` accepting `dev:` tokens from [`ALLOWED_ORIGIN`].
pub fn ws_state(hub: Arc<NotificationHub>) -> WsState {
    WsState::new(Arc::new(DevIdentityVerifier), hub, [ALLOWED_ORIGIN])
}

//! Shared WebSocket adapter state.

use std::sync::Arc;

use url::Url;

use crate::domain::ports::IdentityVerifier;
use crate::inbound::ws::hub::NotificationHub;

/// Dependency bundle for the notification socket.
#[derive(Clone)]
pub struct WsState {
    pub identity: Arc<dyn IdentityVerifier>,
    pub hub: Arc<NotificationHub>,
    allowed_origins: Arc<[String]>,
}

impl WsState {
    /// Construct state from the verifier, hub, and browser origin allow-list.
    ///
    /// Origins are normalised to `scheme://host[:port]`; entries that do not
    /// parse as URLs are ignored.
    pub fn new(
        identity: Arc<dyn IdentityVerifier>,
        hub: Arc<NotificationHub>,
        allowed_origins: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        let allowed_origins = allowed_origins
            .into_iter()
            .filter_map(|origin| Url::parse(origin.as_ref()).ok())
            .map(|url| url.origin().ascii_serialization())
            .collect();
        Self {
            identity,
            hub,
            allowed_origins,
        }
    }

    /// Whether a parsed `Origin` header is on the allow-list.
    #[must_use]
    pub fn allows_origin(&self, origin: &Url) -> bool {
        let origin = origin.origin();
        origin.is_tuple()
            && self
                .allowed_origins
                .iter()
                .any(|allowed| *allowed == origin.ascii_serialization())
    }
}

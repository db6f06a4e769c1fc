//! In-process fan-out of notifications to live WebSocket sessions.
//!
//! Each owner gets a lazily created `tokio::sync::broadcast` channel. Sessions
//! subscribe on connect; the reminder dispatcher publishes through the
//! [`NotificationPublisher`] port without knowing about sockets.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::ports::NotificationPublisher;
use crate::domain::{Notification, OwnerId};

/// Per-owner buffer; slow sessions past this many messages see `Lagged`.
const CHANNEL_CAPACITY: usize = 32;

/// Broadcast hub keyed by owner.
#[derive(Debug, Default)]
pub struct NotificationHub {
    channels: Mutex<HashMap<OwnerId, broadcast::Sender<Arc<Notification>>>>,
}

impl NotificationHub {
    /// Create an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to notifications for `owner`.
    pub fn subscribe(&self, owner: &OwnerId) -> broadcast::Receiver<Arc<Notification>> {
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        channels
            .entry(owner.clone())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Number of live sessions for `owner`.
    #[must_use]
    pub fn session_count(&self, owner: &OwnerId) -> usize {
        let channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        channels.get(owner).map_or(0, broadcast::Sender::receiver_count)
    }
}

impl NotificationPublisher for NotificationHub {
    fn publish(&self, notification: &Notification) -> usize {
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = channels.get(&notification.owner) else {
            return 0;
        };
        match sender.send(Arc::new(notification.clone())) {
            Ok(delivered) => delivered,
            Err(_) => {
                // Every session for this owner has gone away.
                channels.remove(&notification.owner);
                debug!(owner = %notification.owner, "dropped idle notification channel");
                0
            }
        }
    }
}

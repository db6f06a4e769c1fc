//! Port for pushing notifications to connected clients.

use crate::domain::Notification;

/// Fan-out of freshly created notifications to live sessions.
///
/// Delivery is best effort: a publisher with no listening session for the
/// owner drops the message.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationPublisher: Send + Sync {
    /// Publish `notification`; returns how many sessions received it.
    fn publish(&self, notification: &Notification) -> usize;
}

/// Publisher used when live push is not wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotificationPublisher;

impl NotificationPublisher for NoopNotificationPublisher {
    fn publish(&self, _notification: &Notification) -> usize {
        0
    }
}

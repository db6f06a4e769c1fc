//! Driving port for notification state changes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Notification, OwnerId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsCommand: Send + Sync {
    /// Mark one notification read; `not_found` when absent or not owned.
    async fn mark_read(&self, owner: &OwnerId, notification_id: Uuid)
    -> Result<Notification, Error>;

    /// Mark all unread notifications read; returns how many changed.
    async fn mark_all_read(&self, owner: &OwnerId) -> Result<u64, Error>;
}

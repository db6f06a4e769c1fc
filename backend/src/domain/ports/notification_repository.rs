//! Port for notification persistence.

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::{Notification, NotificationFilter, OwnerId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification repository adapters.
    pub enum NotificationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "notification repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "notification repository query failed: {message}",
    }
}

/// Port for owner-scoped notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persist a new notification.
    async fn create(&self, notification: &Notification) -> Result<(), NotificationRepositoryError>;

    /// One page of `owner`'s notifications, newest first.
    async fn list_for_owner(
        &self,
        owner: &OwnerId,
        filter: NotificationFilter,
        page: PageRequest,
    ) -> Result<Page<Notification>, NotificationRepositoryError>;

    /// Mark one notification read; `None` when absent or not owned.
    async fn mark_read(
        &self,
        owner: &OwnerId,
        notification_id: &Uuid,
    ) -> Result<Option<Notification>, NotificationRepositoryError>;

    /// Mark every unread notification of `owner` read; returns the count.
    async fn mark_all_read(&self, owner: &OwnerId) -> Result<u64, NotificationRepositoryError>;
}

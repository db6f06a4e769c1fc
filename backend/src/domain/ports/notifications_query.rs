//! Driving port for listing notifications.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, Notification, NotificationFilter, OwnerId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsQuery: Send + Sync {
    /// One page of notifications, newest first.
    async fn list_notifications(
        &self,
        owner: &OwnerId,
        filter: NotificationFilter,
        page: PageRequest,
    ) -> Result<Page<Notification>, Error>;
}

//! Notification listing and read-state service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::ports::{
    NotificationRepository, NotificationRepositoryError, NotificationsCommand,
    NotificationsQuery,
};
use crate::domain::{Error, Notification, NotificationFilter, OwnerId};

pub(crate) fn map_notification_repository_error(error: NotificationRepositoryError) -> Error {
    match error {
        NotificationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("notification repository unavailable: {message}"))
        }
        NotificationRepositoryError::Query { message } => {
            Error::internal(format!("notification repository error: {message}"))
        }
    }
}

/// Notification service implementing the notification driving ports.
pub struct NotificationService<R: ?Sized> {
    notifications: Arc<R>,
}

impl<R: ?Sized> NotificationService<R> {
    /// Create a service over `notifications`.
    pub fn new(notifications: Arc<R>) -> Self {
        Self { notifications }
    }
}

#[async_trait]
impl<R> NotificationsQuery for NotificationService<R>
where
    R: NotificationRepository + ?Sized,
{
    async fn list_notifications(
        &self,
        owner: &OwnerId,
        filter: NotificationFilter,
        page: PageRequest,
    ) -> Result<Page<Notification>, Error> {
        self.notifications
            .list_for_owner(owner, filter, page)
            .await
            .map_err(map_notification_repository_error)
    }
}

#[async_trait]
impl<R> NotificationsCommand for NotificationService<R>
where
    R: NotificationRepository + ?Sized,
{
    async fn mark_read(
        &self,
        owner: &OwnerId,
        notification_id: Uuid,
    ) -> Result<Notification, Error> {
        self.notifications
            .mark_read(owner, &notification_id)
            .await
            .map_err(map_notification_repository_error)?
            .ok_or_else(|| Error::not_found(format!("notification {notification_id} not found")))
    }

    async fn mark_all_read(&self, owner: &OwnerId) -> Result<u64, Error> {
        self.notifications
            .mark_all_read(owner)
            .await
            .map_err(map_notification_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockNotificationRepository;

    fn owner() -> OwnerId {
        OwnerId::new("owner-1").expect("owner")
    }

    #[rstest]
    #[tokio::test]
    async fn marking_someone_elses_notification_is_not_found() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_mark_read().return_once(|_, _| Ok(None));
        let service = NotificationService::new(Arc::new(repo));

        let error = service
            .mark_read(&owner(), Uuid::new_v4())
            .await
            .expect_err("not found");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn mark_all_read_returns_modified_count() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_mark_all_read().return_once(|_| Ok(3));
        let service = NotificationService::new(Arc::new(repo));

        assert_eq!(service.mark_all_read(&owner()).await.expect("count"), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn listing_forwards_filter_and_page() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_list_for_owner()
            .withf(|_, filter, page| filter.read == Some(false) && page.page() == 2)
            .return_once(|_, _, page| Ok(Page::new(Vec::new(), page, 25)));
        let service = NotificationService::new(Arc::new(repo));

        let page = PageRequest::new(Some(2), Some(20)).expect("page");
        let listed = service
            .list_notifications(&owner(), NotificationFilter { read: Some(false) }, page)
            .await
            .expect("listing");
        assert_eq!(listed.info().total_pages, 2);
        assert!(listed.info().has_prev_page);
        assert!(!listed.info().has_next_page);
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failure_is_unavailable() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_mark_all_read()
            .return_once(|_| Err(NotificationRepositoryError::connection("refused")));
        let service = NotificationService::new(Arc::new(repo));

        let error = service.mark_all_read(&owner()).await.expect_err("fails");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}

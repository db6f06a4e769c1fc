//! In-memory notification inbox.

use std::sync::Mutex;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use super::lock;
use crate::domain::ports::{NotificationRepository, NotificationRepositoryError};
use crate::domain::{Notification, NotificationFilter, OwnerId};

/// Notifications in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryNotificationRepository {
    inbox: Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepository {
    /// Empty inbox.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create(&self, notification: &Notification) -> Result<(), NotificationRepositoryError> {
        lock(&self.inbox, "notification")
            .map_err(NotificationRepositoryError::query)?
            .push(notification.clone());
        Ok(())
    }

    async fn list_for_owner(
        &self,
        owner: &OwnerId,
        filter: NotificationFilter,
        page: PageRequest,
    ) -> Result<Page<Notification>, NotificationRepositoryError> {
        let inbox = lock(&self.inbox, "notification").map_err(NotificationRepositoryError::query)?;
        let mut matching: Vec<&Notification> = inbox
            .iter()
            .filter(|n| &n.owner == owner && filter.matches(n))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(skip)
            .take(take)
            .cloned()
            .collect();
        Ok(Page::new(items, page, total))
    }

    async fn mark_read(
        &self,
        owner: &OwnerId,
        notification_id: &Uuid,
    ) -> Result<Option<Notification>, NotificationRepositoryError> {
        let mut inbox =
            lock(&self.inbox, "notification").map_err(NotificationRepositoryError::query)?;
        Ok(inbox
            .iter_mut()
            .find(|n| &n.owner == owner && n.id == *notification_id)
            .map(|n| {
                n.read = true;
                n.clone()
            }))
    }

    async fn mark_all_read(&self, owner: &OwnerId) -> Result<u64, NotificationRepositoryError> {
        let mut inbox =
            lock(&self.inbox, "notification").map_err(NotificationRepositoryError::query)?;
        let mut updated = 0_u64;
        for n in inbox.iter_mut().filter(|n| &n.owner == owner && !n.read) {
            n.read = true;
            updated += 1;
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::NotificationKind;

    fn notification(owner: &str, minutes_ago: i64, read: bool) -> Notification {
        let at = Utc::now() - Duration::minutes(minutes_ago);
        Notification {
            id: Uuid::new_v4(),
            owner: OwnerId::new(owner).expect("owner"),
            habit_id: Uuid::new_v4(),
            kind: NotificationKind::Reminder,
            title: "Habit reminder".to_owned(),
            message: "Time to complete your habit: Read".to_owned(),
            read,
            scheduled_for: at,
            created_at: at,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn pages_newest_first_with_filter() {
        let repo = InMemoryNotificationRepository::new();
        let newest = notification("a", 1, false);
        for n in [notification("a", 10, false), newest.clone(), notification("a", 5, true)] {
            repo.create(&n).await.expect("create");
        }
        let owner = OwnerId::new("a").expect("owner");

        let page = repo
            .list_for_owner(
                &owner,
                NotificationFilter { read: Some(false) },
                PageRequest::new(Some(1), Some(1)).expect("page"),
            )
            .await
            .expect("list");

        assert_eq!(page.info().total_items, 2);
        assert_eq!(page.items().first().map(|n| n.id), Some(newest.id));
    }

    #[rstest]
    #[tokio::test]
    async fn mark_read_is_owner_scoped() {
        let repo = InMemoryNotificationRepository::new();
        let stored = notification("a", 1, false);
        repo.create(&stored).await.expect("create");

        let foreign = repo
            .mark_read(&OwnerId::new("b").expect("owner"), &stored.id)
            .await
            .expect("mark");
        let own = repo
            .mark_read(&stored.owner, &stored.id)
            .await
            .expect("mark");

        assert!(foreign.is_none());
        assert!(own.is_some_and(|n| n.read));
    }

    #[rstest]
    #[tokio::test]
    async fn mark_all_read_counts_unread_only() {
        let repo = InMemoryNotificationRepository::new();
        for n in [notification("a", 1, false), notification("a", 2, true), notification("b", 3, false)] {
            repo.create(&n).await.expect("create");
        }

        let count = repo
            .mark_all_read(&OwnerId::new("a").expect("owner"))
            .await
            .expect("mark");
        assert_eq!(count, 1);
    }
}

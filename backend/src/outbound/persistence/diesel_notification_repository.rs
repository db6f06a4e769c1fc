//! PostgreSQL-backed `NotificationRepository`.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::ports::{NotificationRepository, NotificationRepositoryError};
use crate::domain::{Notification, NotificationFilter, NotificationKind, OwnerId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NotificationRow;
use super::pool::{DbPool, PoolError};
use super::schema::notifications;

/// Diesel adapter for the `notifications` table.
#[derive(Clone)]
pub struct DieselNotificationRepository {
    pool: DbPool,
}

impl DieselNotificationRepository {
    /// Repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NotificationRepositoryError {
    map_basic_pool_error(error, NotificationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> NotificationRepositoryError {
    map_basic_diesel_error(
        error,
        NotificationRepositoryError::query,
        NotificationRepositoryError::connection,
    )
}

fn notification_to_row(notification: &Notification) -> NotificationRow {
    NotificationRow {
        id: notification.id,
        owner_id: notification.owner.as_str().to_owned(),
        habit_id: notification.habit_id,
        kind: notification.kind.as_str().to_owned(),
        title: notification.title.clone(),
        message: notification.message.clone(),
        read: notification.read,
        scheduled_for: notification.scheduled_for,
        created_at: notification.created_at,
    }
}

fn row_to_notification(row: NotificationRow) -> Result<Notification, NotificationRepositoryError> {
    let owner = OwnerId::new(row.owner_id).map_err(|err| {
        NotificationRepositoryError::query(format!("invalid notifications.owner_id: {err}"))
    })?;
    let kind = row.kind.parse::<NotificationKind>().map_err(|err| {
        NotificationRepositoryError::query(format!("invalid notifications.kind: {err}"))
    })?;
    Ok(Notification {
        id: row.id,
        owner,
        habit_id: row.habit_id,
        kind,
        title: row.title,
        message: row.message,
        read: row.read,
        scheduled_for: row.scheduled_for,
        created_at: row.created_at,
    })
}

fn filtered<'a>(
    owner: &'a OwnerId,
    filter: NotificationFilter,
) -> notifications::BoxedQuery<'a, Pg> {
    let query = notifications::table
        .filter(notifications::owner_id.eq(owner.as_str()))
        .into_boxed();
    match filter.read {
        Some(read) => query.filter(notifications::read.eq(read)),
        None => query,
    }
}

#[async_trait]
impl NotificationRepository for DieselNotificationRepository {
    async fn create(&self, notification: &Notification) -> Result<(), NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(notifications::table)
            .values(&notification_to_row(notification))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_owner(
        &self,
        owner: &OwnerId,
        filter: NotificationFilter,
        page: PageRequest,
    ) -> Result<Page<Notification>, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = filtered(owner, filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        let rows: Vec<NotificationRow> = filtered(owner, filter)
            .order(notifications::created_at.desc())
            .offset(offset)
            .limit(i64::from(page.limit()))
            .select(NotificationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let items = rows
            .into_iter()
            .map(row_to_notification)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, page, u64::try_from(total).unwrap_or(0)))
    }

    async fn mark_read(
        &self,
        owner: &OwnerId,
        notification_id: &Uuid,
    ) -> Result<Option<Notification>, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<NotificationRow> = diesel::update(
            notifications::table
                .filter(notifications::id.eq(*notification_id))
                .filter(notifications::owner_id.eq(owner.as_str())),
        )
        .set(notifications::read.eq(true))
        .returning(NotificationRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        row.map(row_to_notification).transpose()
    }

    async fn mark_all_read(&self, owner: &OwnerId) -> Result<u64, NotificationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            notifications::table
                .filter(notifications::owner_id.eq(owner.as_str()))
                .filter(notifications::read.eq(false)),
        )
        .set(notifications::read.eq(true))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(u64::try_from(updated).unwrap_or(u64::MAX))
    }
}

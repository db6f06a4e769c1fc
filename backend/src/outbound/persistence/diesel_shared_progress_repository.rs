//! PostgreSQL-backed `SharedProgressRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SharedProgressRepository, SharedProgressRepositoryError};
use crate::domain::{OwnerId, SharedProgress};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::SharedProgressRow;
use super::pool::{DbPool, PoolError};
use super::schema::shared_progress;

/// Diesel adapter for the `shared_progress` table.
#[derive(Clone)]
pub struct DieselSharedProgressRepository {
    pool: DbPool,
}

impl DieselSharedProgressRepository {
    /// Repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SharedProgressRepositoryError {
    map_basic_pool_error(error, SharedProgressRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SharedProgressRepositoryError {
    map_basic_diesel_error(
        error,
        SharedProgressRepositoryError::query,
        SharedProgressRepositoryError::connection,
    )
}

fn shared_to_row(shared: &SharedProgress) -> SharedProgressRow {
    SharedProgressRow {
        token: shared.token.clone(),
        owner_id: shared.owner.as_str().to_owned(),
        habit_id: shared.habit_id,
        image_url: shared.image_url.clone(),
        shared_at: shared.shared_at,
        expires_at: shared.expires_at,
    }
}

fn row_to_shared(row: SharedProgressRow) -> Result<SharedProgress, SharedProgressRepositoryError> {
    let owner = OwnerId::new(row.owner_id).map_err(|err| {
        SharedProgressRepositoryError::query(format!("invalid shared_progress.owner_id: {err}"))
    })?;
    Ok(SharedProgress {
        token: row.token,
        owner,
        habit_id: row.habit_id,
        image_url: row.image_url,
        shared_at: row.shared_at,
        expires_at: row.expires_at,
    })
}

#[async_trait]
impl SharedProgressRepository for DieselSharedProgressRepository {
    async fn insert(&self, shared: &SharedProgress) -> Result<(), SharedProgressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(shared_progress::table)
            .values(&shared_to_row(shared))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<SharedProgress>, SharedProgressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<SharedProgressRow> = shared_progress::table
            .find(token)
            .select(SharedProgressRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_shared).transpose()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    #[rstest]
    fn row_conversion_preserves_snapshot() {
        let now = Utc::now();
        let shared = SharedProgress {
            token: "header.claims.signature".to_owned(),
            owner: OwnerId::new("owner-1").expect("owner"),
            habit_id: Some(Uuid::new_v4()),
            image_url: "https://cdn.example/p.png".to_owned(),
            shared_at: now,
            expires_at: now + TimeDelta::days(7),
        };
        let restored = row_to_shared(shared_to_row(&shared)).expect("converts");
        assert_eq!(restored, shared);
    }
}

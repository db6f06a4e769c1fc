//! PostgreSQL-backed `UserPreferencesRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPreferencesRepository, UserPreferencesRepositoryError};
use crate::domain::{OwnerId, Theme, UserPreferences};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserPreferencesRow, UserPreferencesRow};
use super::pool::{DbPool, PoolError};
use super::schema::user_preferences;

/// Diesel adapter for the `user_preferences` table.
#[derive(Clone)]
pub struct DieselUserPreferencesRepository {
    pool: DbPool,
}

impl DieselUserPreferencesRepository {
    /// Repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPreferencesRepositoryError {
    map_basic_pool_error(error, UserPreferencesRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPreferencesRepositoryError {
    map_basic_diesel_error(
        error,
        UserPreferencesRepositoryError::query,
        UserPreferencesRepositoryError::connection,
    )
}

fn preferences_to_row(preferences: &UserPreferences, now: DateTime<Utc>) -> NewUserPreferencesRow {
    NewUserPreferencesRow {
        owner_id: preferences.owner.as_str().to_owned(),
        theme: preferences.theme.as_str().to_owned(),
        updated_at: preferences.updated_at.unwrap_or(now),
    }
}

fn row_to_preferences(
    row: UserPreferencesRow,
) -> Result<UserPreferences, UserPreferencesRepositoryError> {
    let owner = OwnerId::new(row.owner_id).map_err(|err| {
        UserPreferencesRepositoryError::query(format!("invalid user_preferences.owner_id: {err}"))
    })?;
    let theme = row.theme.parse::<Theme>().map_err(|err| {
        UserPreferencesRepositoryError::query(format!("invalid user_preferences.theme: {err}"))
    })?;
    Ok(UserPreferences::saved(owner, theme, row.updated_at))
}

#[async_trait]
impl UserPreferencesRepository for DieselUserPreferencesRepository {
    async fn find(
        &self,
        owner: &OwnerId,
    ) -> Result<Option<UserPreferences>, UserPreferencesRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserPreferencesRow> = user_preferences::table
            .find(owner.as_str())
            .select(UserPreferencesRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_preferences).transpose()
    }

    async fn upsert(
        &self,
        preferences: &UserPreferences,
    ) -> Result<UserPreferences, UserPreferencesRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: UserPreferencesRow = diesel::insert_into(user_preferences::table)
            .values(&preferences_to_row(preferences, Utc::now()))
            .on_conflict(user_preferences::owner_id)
            .do_update()
            .set((
                user_preferences::theme.eq(excluded(user_preferences::theme)),
                user_preferences::updated_at.eq(excluded(user_preferences::updated_at)),
            ))
            .returning(UserPreferencesRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_preferences(row)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn row_conversion_preserves_preferences() {
        let now = Utc::now();
        let owner = OwnerId::new("owner-1").expect("owner");
        let prefs = UserPreferences::saved(owner, Theme::Dark, now);
        let written = preferences_to_row(&prefs, now);
        let restored = row_to_preferences(UserPreferencesRow {
            owner_id: written.owner_id,
            theme: written.theme,
            updated_at: written.updated_at,
        })
        .expect("converts");
        assert_eq!(restored, prefs);
    }

    #[rstest]
    fn unknown_stored_theme_is_a_query_error() {
        let result = row_to_preferences(UserPreferencesRow {
            owner_id: "owner-1".to_owned(),
            theme: "sepia".to_owned(),
            updated_at: Utc::now(),
        });
        assert!(matches!(
            result,
            Err(UserPreferencesRepositoryError::Query { .. })
        ));
    }
}

//! PostgreSQL-backed `AchievementRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{AchievementRepository, AchievementRepositoryError, InsertOutcome};
use crate::domain::{Achievement, AchievementKind, CalendarDay, OwnerId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::AchievementRow;
use super::pool::{DbPool, PoolError};
use super::schema::achievements;

/// Diesel adapter for the `achievements` table.
#[derive(Clone)]
pub struct DieselAchievementRepository {
    pool: DbPool,
}

impl DieselAchievementRepository {
    /// Repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AchievementRepositoryError {
    map_basic_pool_error(error, AchievementRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AchievementRepositoryError {
    map_basic_diesel_error(
        error,
        AchievementRepositoryError::query,
        AchievementRepositoryError::connection,
    )
}

fn achievement_to_row(achievement: &Achievement) -> AchievementRow {
    AchievementRow {
        id: achievement.id,
        owner_id: achievement.owner.as_str().to_owned(),
        name: achievement.name.clone(),
        description: achievement.description.clone(),
        kind: achievement.kind.as_str().to_owned(),
        criteria: achievement.criteria.clone(),
        badge_svg: achievement.badge_svg.clone(),
        awarded_on: achievement.awarded_on.date(),
        habit_id: achievement.habit_id,
        created_at: achievement.created_at,
    }
}

fn row_to_achievement(row: AchievementRow) -> Result<Achievement, AchievementRepositoryError> {
    let owner = OwnerId::new(row.owner_id).map_err(|err| {
        AchievementRepositoryError::query(format!("invalid achievements.owner_id: {err}"))
    })?;
    let kind = row.kind.parse::<AchievementKind>().map_err(|err| {
        AchievementRepositoryError::query(format!("invalid achievements.kind: {err}"))
    })?;
    Ok(Achievement {
        id: row.id,
        owner,
        name: row.name,
        description: row.description,
        kind,
        criteria: row.criteria,
        badge_svg: row.badge_svg,
        awarded_on: CalendarDay::new(row.awarded_on),
        habit_id: row.habit_id,
        created_at: row.created_at,
    })
}

#[async_trait]
impl AchievementRepository for DieselAchievementRepository {
    async fn find_for_habit(
        &self,
        owner: &OwnerId,
        kind: AchievementKind,
        habit_id: &Uuid,
    ) -> Result<Option<Achievement>, AchievementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AchievementRow> = achievements::table
            .filter(achievements::owner_id.eq(owner.as_str()))
            .filter(achievements::kind.eq(kind.as_str()))
            .filter(achievements::habit_id.eq(*habit_id))
            .select(AchievementRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_achievement).transpose()
    }

    async fn insert_if_absent(
        &self,
        achievement: &Achievement,
    ) -> Result<InsertOutcome<Achievement>, AchievementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // No conflict target: either partial unique index may fire.
        let written = diesel::insert_into(achievements::table)
            .values(&achievement_to_row(achievement))
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if written > 0 {
            return Ok(InsertOutcome::Inserted(achievement.clone()));
        }

        let scoped = achievements::table
            .filter(achievements::owner_id.eq(achievement.owner.as_str()))
            .filter(achievements::kind.eq(achievement.kind.as_str()))
            .into_boxed();
        let keyed = match achievement.habit_id {
            Some(habit_id) => scoped.filter(achievements::habit_id.eq(habit_id)),
            None => scoped
                .filter(achievements::habit_id.is_null())
                .filter(achievements::name.eq(achievement.name.as_str())),
        };
        let existing: AchievementRow = keyed
            .select(AchievementRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_achievement(existing).map(InsertOutcome::Duplicate)
    }

    async fn list_for_owner(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<Achievement>, AchievementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AchievementRow> = achievements::table
            .filter(achievements::owner_id.eq(owner.as_str()))
            .order((achievements::awarded_on.desc(), achievements::created_at.desc()))
            .select(AchievementRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_achievement).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn sample() -> Achievement {
        Achievement {
            id: Uuid::new_v4(),
            owner: OwnerId::new("owner-1").expect("owner"),
            name: "Perfect Week".to_owned(),
            description: "Completed the habit \"Run\" for 7 consecutive days".to_owned(),
            kind: AchievementKind::PerfectWeek,
            criteria: json!({"days": 7}),
            badge_svg: "<svg/>".to_owned(),
            awarded_on: CalendarDay::from_ymd(2026, 4, 7).expect("day"),
            habit_id: Some(Uuid::new_v4()),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn row_conversion_preserves_achievement() {
        let achievement = sample();
        let restored = row_to_achievement(achievement_to_row(&achievement)).expect("converts");
        assert_eq!(restored, achievement);
    }

    #[rstest]
    fn unknown_kind_is_rejected() {
        let mut row = achievement_to_row(&sample());
        row.kind = "legendary".to_owned();
        assert!(matches!(
            row_to_achievement(row),
            Err(AchievementRepositoryError::Query { .. })
        ));
    }
}

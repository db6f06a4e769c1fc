//! Achievement evaluation and listing.
//!
//! [`AchievementEvaluator`] runs after every successful streak update. It
//! never fails the triggering check-in: lookup and persistence errors are
//! logged and swallowed. A uniqueness collision on insert means a concurrent
//! check-in already granted the award and is treated as a no-op.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::habit_service::{habit_not_found, map_habit_repository_error};
use crate::domain::ports::{
    AchievementListing, AchievementRepository, AchievementRepositoryError, AchievementsQuery,
    CheckinMetrics, HabitRepository, InsertOutcome,
};
use crate::domain::{Achievement, CalendarDay, Error, OwnerId, RULES};

fn map_achievement_repository_error(error: AchievementRepositoryError) -> Error {
    match error {
        AchievementRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("achievement repository unavailable: {message}"))
        }
        AchievementRepositoryError::Query { message } => {
            Error::internal(format!("achievement repository error: {message}"))
        }
    }
}

/// Grants one-time achievements after a check-in.
#[derive(Clone)]
pub struct AchievementEvaluator {
    habits: Arc<dyn HabitRepository>,
    achievements: Arc<dyn AchievementRepository>,
    metrics: Arc<dyn CheckinMetrics>,
    clock: Arc<dyn Clock>,
}

impl AchievementEvaluator {
    /// Build an evaluator over its ports.
    pub fn new(
        habits: Arc<dyn HabitRepository>,
        achievements: Arc<dyn AchievementRepository>,
        metrics: Arc<dyn CheckinMetrics>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            habits,
            achievements,
            metrics,
            clock,
        }
    }

    /// Evaluate every rule for `habit_id` and return the awards granted by
    /// this call. Errors are logged, never returned.
    pub async fn check_achievements(
        &self,
        owner: &OwnerId,
        habit_id: Uuid,
        day: CalendarDay,
    ) -> Vec<Achievement> {
        match self.try_check(owner, habit_id, day).await {
            Ok(granted) => granted,
            Err(error) => {
                warn!(
                    owner = %owner,
                    habit_id = %habit_id,
                    error = %error,
                    "achievement evaluation failed"
                );
                Vec::new()
            }
        }
    }

    async fn try_check(
        &self,
        owner: &OwnerId,
        habit_id: Uuid,
        day: CalendarDay,
    ) -> Result<Vec<Achievement>, Error> {
        let habit = self
            .habits
            .find_owned(owner, &habit_id)
            .await
            .map_err(map_habit_repository_error)?
            .ok_or_else(|| habit_not_found(habit_id))?;

        let mut granted = Vec::new();
        for rule in RULES {
            let Some(grant) = rule.evaluate(&habit) else {
                continue;
            };
            let existing = self
                .achievements
                .find_for_habit(owner, grant.kind, &habit_id)
                .await
                .map_err(map_achievement_repository_error)?;
            if existing.is_some() {
                continue;
            }

            let kind = grant.kind;
            let achievement =
                grant.into_achievement(Uuid::new_v4(), owner.clone(), day, self.clock.utc());
            match self
                .achievements
                .insert_if_absent(&achievement)
                .await
                .map_err(map_achievement_repository_error)?
            {
                InsertOutcome::Inserted(stored) => {
                    info!(owner = %owner, habit_id = %habit_id, kind = %kind, "achievement granted");
                    if let Err(error) = self.metrics.record_achievement(kind).await {
                        warn!(error = %error, "failed to record achievement metric");
                    }
                    granted.push(stored);
                }
                InsertOutcome::Duplicate(_) => {
                    debug!(owner = %owner, habit_id = %habit_id, kind = %kind, "achievement already granted");
                }
            }
        }
        Ok(granted)
    }
}

/// Lists an owner's achievements.
pub struct AchievementService<R: ?Sized> {
    achievements: Arc<R>,
}

impl<R: ?Sized> AchievementService<R> {
    /// Create a service over `achievements`.
    pub fn new(achievements: Arc<R>) -> Self {
        Self { achievements }
    }
}

#[async_trait]
impl<R> AchievementsQuery for AchievementService<R>
where
    R: AchievementRepository + ?Sized,
{
    async fn list_achievements(&self, owner: &OwnerId) -> Result<AchievementListing, Error> {
        let mut achievements = self
            .achievements
            .list_for_owner(owner)
            .await
            .map_err(map_achievement_repository_error)?;
        achievements.sort_by(|a, b| {
            b.awarded_on
                .cmp(&a.awarded_on)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(AchievementListing {
            total: achievements.len(),
            achievements,
        })
    }
}

#[cfg(test)]
#[path = "achievement_service_tests.rs"]
mod tests;

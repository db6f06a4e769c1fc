//! In-memory achievement store.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::lock;
use crate::domain::ports::{AchievementRepository, AchievementRepositoryError, InsertOutcome};
use crate::domain::{Achievement, AchievementKind, OwnerId};

/// Awards keyed by `(owner, kind, habit)` or, for global awards,
/// `(owner, kind, name)`.
#[derive(Debug, Default)]
pub struct InMemoryAchievementRepository {
    awards: Mutex<Vec<Achievement>>,
}

impl InMemoryAchievementRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn same_key(a: &Achievement, b: &Achievement) -> bool {
    if a.owner != b.owner || a.kind != b.kind {
        return false;
    }
    match (a.habit_id, b.habit_id) {
        (Some(left), Some(right)) => left == right,
        (None, None) => a.name == b.name,
        _ => false,
    }
}

#[async_trait]
impl AchievementRepository for InMemoryAchievementRepository {
    async fn find_for_habit(
        &self,
        owner: &OwnerId,
        kind: AchievementKind,
        habit_id: &Uuid,
    ) -> Result<Option<Achievement>, AchievementRepositoryError> {
        let awards = lock(&self.awards, "achievement").map_err(AchievementRepositoryError::query)?;
        Ok(awards
            .iter()
            .find(|a| &a.owner == owner && a.kind == kind && a.habit_id == Some(*habit_id))
            .cloned())
    }

    async fn insert_if_absent(
        &self,
        achievement: &Achievement,
    ) -> Result<InsertOutcome<Achievement>, AchievementRepositoryError> {
        let mut awards =
            lock(&self.awards, "achievement").map_err(AchievementRepositoryError::query)?;
        if let Some(existing) = awards.iter().find(|stored| same_key(stored, achievement)) {
            return Ok(InsertOutcome::Duplicate(existing.clone()));
        }
        awards.push(achievement.clone());
        Ok(InsertOutcome::Inserted(achievement.clone()))
    }

    async fn list_for_owner(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<Achievement>, AchievementRepositoryError> {
        let awards = lock(&self.awards, "achievement").map_err(AchievementRepositoryError::query)?;
        let mut owned: Vec<Achievement> =
            awards.iter().filter(|a| &a.owner == owner).cloned().collect();
        owned.sort_by(|a, b| {
            b.awarded_on
                .cmp(&a.awarded_on)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::CalendarDay;

    fn award(habit_id: Option<Uuid>, name: &str) -> Achievement {
        Achievement {
            id: Uuid::new_v4(),
            owner: OwnerId::new("owner").expect("owner"),
            name: name.to_owned(),
            description: String::new(),
            kind: AchievementKind::PerfectWeek,
            criteria: json!({"days": 7}),
            badge_svg: String::new(),
            awarded_on: CalendarDay::from_ymd(2026, 5, 1).expect("day"),
            habit_id,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn habit_scoped_awards_are_unique_per_habit() {
        let repo = InMemoryAchievementRepository::new();
        let habit = Uuid::new_v4();

        let first = repo
            .insert_if_absent(&award(Some(habit), "Perfect Week"))
            .await
            .expect("insert");
        let again = repo
            .insert_if_absent(&award(Some(habit), "Renamed"))
            .await
            .expect("insert");
        let other = repo
            .insert_if_absent(&award(Some(Uuid::new_v4()), "Perfect Week"))
            .await
            .expect("insert");

        assert!(first.is_inserted());
        assert!(!again.is_inserted());
        assert!(other.is_inserted());
    }

    #[rstest]
    #[tokio::test]
    async fn global_awards_are_unique_per_name() {
        let repo = InMemoryAchievementRepository::new();

        let first = repo
            .insert_if_absent(&award(None, "Starter"))
            .await
            .expect("insert");
        let again = repo
            .insert_if_absent(&award(None, "Starter"))
            .await
            .expect("insert");
        let different = repo
            .insert_if_absent(&award(None, "Veteran"))
            .await
            .expect("insert");

        assert!(first.is_inserted());
        assert!(!again.is_inserted());
        assert!(different.is_inserted());
    }
}

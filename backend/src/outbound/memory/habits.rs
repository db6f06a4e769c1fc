//! In-memory habit repository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::lock;
use crate::domain::ports::{HabitRepository, HabitRepositoryError};
use crate::domain::{Habit, OwnerId, ReminderTime, StreakState};

/// Habits keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryHabitRepository {
    store: Mutex<HashMap<Uuid, Habit>>,
}

impl InMemoryHabitRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, Habit>>, HabitRepositoryError> {
        lock(&self.store, "habit").map_err(HabitRepositoryError::query)
    }
}

#[async_trait]
impl HabitRepository for InMemoryHabitRepository {
    async fn create(&self, habit: &Habit) -> Result<(), HabitRepositoryError> {
        self.guard()?.insert(habit.id(), habit.clone());
        Ok(())
    }

    async fn find_owned(
        &self,
        owner: &OwnerId,
        habit_id: &Uuid,
    ) -> Result<Option<Habit>, HabitRepositoryError> {
        Ok(self
            .guard()?
            .get(habit_id)
            .filter(|habit| habit.owner() == owner)
            .cloned())
    }

    async fn list_for_owner(&self, owner: &OwnerId) -> Result<Vec<Habit>, HabitRepositoryError> {
        let mut habits: Vec<Habit> = self
            .guard()?
            .values()
            .filter(|habit| habit.owner() == owner)
            .cloned()
            .collect();
        habits.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(habits)
    }

    async fn update(&self, habit: &Habit) -> Result<bool, HabitRepositoryError> {
        let mut guard = self.guard()?;
        let Some(stored) = guard.get_mut(&habit.id()) else {
            return Ok(false);
        };
        // Streak fields belong to the check-in path; keep the stored ones.
        let streak = *stored.streak();
        let mut replacement = habit.clone();
        replacement.record_streak(streak, habit.updated_at());
        *stored = replacement;
        Ok(true)
    }

    async fn save_streak(
        &self,
        habit_id: &Uuid,
        streak: &StreakState,
        updated_at: DateTime<Utc>,
    ) -> Result<(), HabitRepositoryError> {
        let mut guard = self.guard()?;
        let habit = guard
            .get_mut(habit_id)
            .ok_or_else(|| HabitRepositoryError::query(format!("habit {habit_id} missing")))?;
        habit.record_streak(*streak, updated_at);
        Ok(())
    }

    async fn delete_owned(
        &self,
        owner: &OwnerId,
        habit_id: &Uuid,
    ) -> Result<bool, HabitRepositoryError> {
        let mut guard = self.guard()?;
        let owned = guard
            .get(habit_id)
            .is_some_and(|habit| habit.owner() == owner);
        if owned {
            guard.remove(habit_id);
        }
        Ok(owned)
    }

    async fn list_due_reminders(
        &self,
        at: ReminderTime,
    ) -> Result<Vec<Habit>, HabitRepositoryError> {
        Ok(self
            .guard()?
            .values()
            .filter(|habit| habit.reminder().is_due_at(at))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;
    use crate::domain::{
        Frequency, HabitDescription, HabitDraft, HabitTitle, ReminderChannel, ReminderConfig,
    };

    fn habit(owner: &str, hour: u32, reminder: ReminderConfig) -> Habit {
        let at = Utc
            .with_ymd_and_hms(2026, 1, 1, hour, 0, 0)
            .single()
            .expect("instant");
        Habit::from(HabitDraft {
            id: Uuid::new_v4(),
            owner: OwnerId::new(owner).expect("owner"),
            owner_email: None,
            title: HabitTitle::new("Habit").expect("title"),
            description: HabitDescription::default(),
            frequency: Frequency::Daily,
            streak: StreakState::empty(),
            reminder,
            created_at: at,
            updated_at: at,
        })
    }

    #[rstest]
    #[tokio::test]
    async fn lists_owner_habits_newest_first() {
        let repo = InMemoryHabitRepository::new();
        let early = habit("a", 1, ReminderConfig::default());
        let late = habit("a", 5, ReminderConfig::default());
        let other = habit("b", 3, ReminderConfig::default());
        for h in [&early, &late, &other] {
            repo.create(h).await.expect("create");
        }

        let listed = repo
            .list_for_owner(&OwnerId::new("a").expect("owner"))
            .await
            .expect("list");
        let ids: Vec<Uuid> = listed.iter().map(Habit::id).collect();
        assert_eq!(ids, vec![late.id(), early.id()]);
    }

    #[rstest]
    #[tokio::test]
    async fn foreign_owner_cannot_delete() {
        let repo = InMemoryHabitRepository::new();
        let stored = habit("a", 1, ReminderConfig::default());
        repo.create(&stored).await.expect("create");

        let removed = repo
            .delete_owned(&OwnerId::new("b").expect("owner"), &stored.id())
            .await
            .expect("delete");
        assert!(!removed);
    }

    #[rstest]
    #[tokio::test]
    async fn update_never_overwrites_streak() {
        let repo = InMemoryHabitRepository::new();
        let stored = habit("a", 1, ReminderConfig::default());
        repo.create(&stored).await.expect("create");
        let streak = StreakState::new(3, 3, None).expect("streak");
        repo.save_streak(&stored.id(), &streak, Utc::now())
            .await
            .expect("streak");

        assert!(repo.update(&stored).await.expect("update"));
        let reloaded = repo
            .find_owned(stored.owner(), &stored.id())
            .await
            .expect("find")
            .expect("present");
        assert_eq!(reloaded.streak(), &streak);
    }

    #[rstest]
    #[tokio::test]
    async fn due_reminders_match_enabled_time() {
        let repo = InMemoryHabitRepository::new();
        let seven = "07:00".parse().expect("time");
        let enabled = ReminderConfig::new(true, Some(seven), None, vec![ReminderChannel::InApp])
            .expect("reminder");
        let disabled = ReminderConfig::new(false, Some(seven), None, Vec::new()).expect("reminder");
        repo.create(&habit("a", 1, enabled)).await.expect("create");
        repo.create(&habit("a", 2, disabled)).await.expect("create");

        let due = repo.list_due_reminders(seven).await.expect("due");
        assert_eq!(due.len(), 1);
    }
}

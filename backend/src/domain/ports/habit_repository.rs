//! Port for habit persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Habit, OwnerId, ReminderTime, StreakState};

use super::define_port_error;

define_port_error! {
    /// Errors raised by habit repository adapters.
    pub enum HabitRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "habit repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "habit repository query failed: {message}",
    }
}

/// Port for storing and reading habits.
///
/// Every read and write except [`HabitRepository::list_due_reminders`] is
/// scoped to one owner; a habit owned by someone else behaves as absent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// Persist a new habit.
    async fn create(&self, habit: &Habit) -> Result<(), HabitRepositoryError>;

    /// Find a habit owned by `owner`.
    async fn find_owned(
        &self,
        owner: &OwnerId,
        habit_id: &Uuid,
    ) -> Result<Option<Habit>, HabitRepositoryError>;

    /// List `owner`'s habits, newest first.
    async fn list_for_owner(&self, owner: &OwnerId) -> Result<Vec<Habit>, HabitRepositoryError>;

    /// Overwrite editable fields (title, description, frequency, reminder).
    ///
    /// Returns `false` when the habit no longer exists.
    async fn update(&self, habit: &Habit) -> Result<bool, HabitRepositoryError>;

    /// Overwrite the materialised streak fields only.
    async fn save_streak(
        &self,
        habit_id: &Uuid,
        streak: &StreakState,
        updated_at: DateTime<Utc>,
    ) -> Result<(), HabitRepositoryError>;

    /// Delete a habit owned by `owner`; returns whether a row was removed.
    ///
    /// Check-ins, achievements, and notifications are left in place.
    async fn delete_owned(
        &self,
        owner: &OwnerId,
        habit_id: &Uuid,
    ) -> Result<bool, HabitRepositoryError>;

    /// Habits across all owners whose enabled reminder fires at `at`.
    async fn list_due_reminders(
        &self,
        at: ReminderTime,
    ) -> Result<Vec<Habit>, HabitRepositoryError>;
}

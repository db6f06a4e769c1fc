//! Driving port for habit mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Error, Frequency, Habit, HabitChanges, HabitDescription, HabitTitle, Identity, OwnerId,
    ReminderConfig,
};

/// Validated input for a new habit.
#[derive(Debug, Clone)]
pub struct CreateHabitRequest {
    pub identity: Identity,
    pub title: HabitTitle,
    pub description: HabitDescription,
    pub frequency: Frequency,
    pub reminder: ReminderConfig,
}

/// Partial edit of an existing habit.
#[derive(Debug, Clone)]
pub struct UpdateHabitRequest {
    pub owner: OwnerId,
    pub habit_id: Uuid,
    pub changes: HabitChanges,
}

/// Replacement reminder settings for an existing habit.
#[derive(Debug, Clone)]
pub struct UpdateReminderRequest {
    pub owner: OwnerId,
    pub habit_id: Uuid,
    pub reminder: ReminderConfig,
}

/// Driving port for habit write operations.
///
/// Streak fields are never writable through this port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitCommand: Send + Sync {
    /// Create a habit with an empty streak.
    async fn create_habit(&self, request: CreateHabitRequest) -> Result<Habit, Error>;

    /// Apply a partial edit; `not_found` when the habit is not owned.
    async fn update_habit(&self, request: UpdateHabitRequest) -> Result<Habit, Error>;

    /// Replace reminder settings; `not_found` when the habit is not owned.
    async fn update_reminder(&self, request: UpdateReminderRequest) -> Result<Habit, Error>;

    /// Delete a habit; `not_found` when the habit is not owned.
    async fn delete_habit(&self, owner: &OwnerId, habit_id: Uuid) -> Result<(), Error>;
}

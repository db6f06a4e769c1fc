//! Driving port for habit reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Habit, OwnerId};

/// Driving port for reading habits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitQuery: Send + Sync {
    /// `owner`'s habits, newest first.
    async fn list_habits(&self, owner: &OwnerId) -> Result<Vec<Habit>, Error>;

    /// One habit; `not_found` when absent or owned by someone else.
    async fn get_habit(&self, owner: &OwnerId, habit_id: Uuid) -> Result<Habit, Error>;
}

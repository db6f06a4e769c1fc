//! Habit CRUD service.
//!
//! Implements [`HabitCommand`] and [`HabitQuery`] over a
//! [`HabitRepository`]. Every lookup is owner-scoped so that a habit owned by
//! someone else is indistinguishable from a missing one.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    CreateHabitRequest, HabitCommand, HabitQuery, HabitRepository, HabitRepositoryError,
    UpdateHabitRequest, UpdateReminderRequest,
};
use crate::domain::{Error, Habit, HabitDraft, OwnerId, StreakState};

pub(crate) fn map_habit_repository_error(error: HabitRepositoryError) -> Error {
    match error {
        HabitRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("habit repository unavailable: {message}"))
        }
        HabitRepositoryError::Query { message } => {
            Error::internal(format!("habit repository error: {message}"))
        }
    }
}

pub(crate) fn habit_not_found(habit_id: Uuid) -> Error {
    Error::not_found(format!("habit {habit_id} not found"))
}

/// Habit service implementing the habit driving ports.
pub struct HabitService<R: ?Sized> {
    habits: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized> HabitService<R> {
    /// Create a service over `habits`.
    pub fn new(habits: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { habits, clock }
    }
}

impl<R> HabitService<R>
where
    R: HabitRepository + ?Sized,
{
    async fn load_owned(&self, owner: &OwnerId, habit_id: Uuid) -> Result<Habit, Error> {
        self.habits
            .find_owned(owner, &habit_id)
            .await
            .map_err(map_habit_repository_error)?
            .ok_or_else(|| habit_not_found(habit_id))
    }

    async fn store_update(&self, habit: Habit) -> Result<Habit, Error> {
        let updated = self
            .habits
            .update(&habit)
            .await
            .map_err(map_habit_repository_error)?;
        if updated {
            Ok(habit)
        } else {
            Err(habit_not_found(habit.id()))
        }
    }
}

#[async_trait]
impl<R> HabitCommand for HabitService<R>
where
    R: HabitRepository + ?Sized,
{
    async fn create_habit(&self, request: CreateHabitRequest) -> Result<Habit, Error> {
        let CreateHabitRequest {
            identity,
            title,
            description,
            frequency,
            reminder,
        } = request;
        let now = self.clock.utc();
        let habit = Habit::from(HabitDraft {
            id: Uuid::new_v4(),
            owner: identity.owner().clone(),
            owner_email: identity.email().map(str::to_owned),
            title,
            description,
            frequency,
            streak: StreakState::empty(),
            reminder,
            created_at: now,
            updated_at: now,
        });
        self.habits
            .create(&habit)
            .await
            .map_err(map_habit_repository_error)?;
        Ok(habit)
    }

    async fn update_habit(&self, request: UpdateHabitRequest) -> Result<Habit, Error> {
        let mut habit = self.load_owned(&request.owner, request.habit_id).await?;
        habit.apply_changes(request.changes, self.clock.utc());
        self.store_update(habit).await
    }

    async fn update_reminder(&self, request: UpdateReminderRequest) -> Result<Habit, Error> {
        let mut habit = self.load_owned(&request.owner, request.habit_id).await?;
        habit.replace_reminder(request.reminder, self.clock.utc());
        self.store_update(habit).await
    }

    async fn delete_habit(&self, owner: &OwnerId, habit_id: Uuid) -> Result<(), Error> {
        let deleted = self
            .habits
            .delete_owned(owner, &habit_id)
            .await
            .map_err(map_habit_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(habit_not_found(habit_id))
        }
    }
}

#[async_trait]
impl<R> HabitQuery for HabitService<R>
where
    R: HabitRepository + ?Sized,
{
    async fn list_habits(&self, owner: &OwnerId) -> Result<Vec<Habit>, Error> {
        self.habits
            .list_for_owner(owner)
            .await
            .map_err(map_habit_repository_error)
    }

    async fn get_habit(&self, owner: &OwnerId, habit_id: Uuid) -> Result<Habit, Error> {
        self.load_owned(owner, habit_id).await
    }
}

#[cfg(test)]
#[path = "habit_service_tests.rs"]
mod tests;

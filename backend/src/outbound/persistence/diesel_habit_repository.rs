//! PostgreSQL-backed `HabitRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{HabitRepository, HabitRepositoryError};
use crate::domain::{
    CalendarDay, Habit, HabitDescription, HabitDraft, HabitTitle, OwnerId, ReminderChannel,
    ReminderConfig, ReminderTime, StreakState,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{HabitRow, HabitUpdate, StreakUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::habits;

/// Diesel adapter for the `habits` table.
#[derive(Clone)]
pub struct DieselHabitRepository {
    pool: DbPool,
}

impl DieselHabitRepository {
    /// Repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> HabitRepositoryError {
    map_basic_pool_error(error, HabitRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> HabitRepositoryError {
    map_basic_diesel_error(
        error,
        HabitRepositoryError::query,
        HabitRepositoryError::connection,
    )
}

fn corrupt(column: &str, detail: impl std::fmt::Display) -> HabitRepositoryError {
    HabitRepositoryError::query(format!("invalid habits.{column} in database: {detail}"))
}

fn to_db_count(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn channel_labels(reminder: &ReminderConfig) -> Vec<String> {
    reminder
        .channels()
        .iter()
        .map(|channel| channel.as_str().to_owned())
        .collect()
}

fn habit_to_row(habit: &Habit) -> HabitRow {
    let streak = habit.streak();
    let reminder = habit.reminder();
    HabitRow {
        id: habit.id(),
        owner_id: habit.owner().as_str().to_owned(),
        owner_email: habit.owner_email().map(str::to_owned),
        title: habit.title().as_str().to_owned(),
        description: habit.description().as_str().to_owned(),
        frequency: habit.frequency().as_str().to_owned(),
        streak_current: to_db_count(streak.current()),
        streak_best: to_db_count(streak.best()),
        last_checkin_date: streak.last_checkin().map(CalendarDay::date),
        reminder_enabled: reminder.enabled(),
        reminder_time: reminder.time().map(ReminderTime::time),
        reminder_timezone: reminder.timezone().to_owned(),
        reminder_channels: channel_labels(reminder),
        created_at: habit.created_at(),
        updated_at: habit.updated_at(),
    }
}

fn row_to_habit(row: HabitRow) -> Result<Habit, HabitRepositoryError> {
    let owner = OwnerId::new(row.owner_id).map_err(|err| corrupt("owner_id", err))?;
    let title = HabitTitle::new(&row.title).map_err(|err| corrupt("title", err))?;
    let description =
        HabitDescription::new(&row.description).map_err(|err| corrupt("description", err))?;
    let frequency = row
        .frequency
        .parse()
        .map_err(|err| corrupt("frequency", err))?;
    let current = u32::try_from(row.streak_current).map_err(|err| corrupt("streak_current", err))?;
    let best = u32::try_from(row.streak_best).map_err(|err| corrupt("streak_best", err))?;
    let streak = StreakState::new(current, best, row.last_checkin_date.map(CalendarDay::new))
        .map_err(|err| corrupt("streak_best", err))?;
    let channels = row
        .reminder_channels
        .iter()
        .map(|label| label.parse::<ReminderChannel>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| corrupt("reminder_channels", err))?;
    let reminder = ReminderConfig::new(
        row.reminder_enabled,
        row.reminder_time.map(ReminderTime::from_time),
        Some(row.reminder_timezone),
        channels,
    )
    .map_err(|err| corrupt("reminder_enabled", err))?;

    Ok(Habit::from(HabitDraft {
        id: row.id,
        owner,
        owner_email: row.owner_email,
        title,
        description,
        frequency,
        streak,
        reminder,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn rows_to_habits(rows: Vec<HabitRow>) -> Result<Vec<Habit>, HabitRepositoryError> {
    rows.into_iter().map(row_to_habit).collect()
}

#[async_trait]
impl HabitRepository for DieselHabitRepository {
    async fn create(&self, habit: &Habit) -> Result<(), HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(habits::table)
            .values(&habit_to_row(habit))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_owned(
        &self,
        owner: &OwnerId,
        habit_id: &Uuid,
    ) -> Result<Option<Habit>, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<HabitRow> = habits::table
            .filter(habits::id.eq(*habit_id))
            .filter(habits::owner_id.eq(owner.as_str()))
            .select(HabitRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_habit).transpose()
    }

    async fn list_for_owner(&self, owner: &OwnerId) -> Result<Vec<Habit>, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<HabitRow> = habits::table
            .filter(habits::owner_id.eq(owner.as_str()))
            .order(habits::created_at.desc())
            .select(HabitRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_habits(rows)
    }

    async fn update(&self, habit: &Habit) -> Result<bool, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let reminder = habit.reminder();
        let changes = HabitUpdate {
            title: habit.title().as_str(),
            description: habit.description().as_str(),
            frequency: habit.frequency().as_str(),
            reminder_enabled: reminder.enabled(),
            reminder_time: reminder.time().map(ReminderTime::time),
            reminder_timezone: reminder.timezone(),
            reminder_channels: channel_labels(reminder),
            updated_at: habit.updated_at(),
        };
        let updated = diesel::update(habits::table)
            .filter(habits::id.eq(habit.id()))
            .filter(habits::owner_id.eq(habit.owner().as_str()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn save_streak(
        &self,
        habit_id: &Uuid,
        streak: &StreakState,
        updated_at: DateTime<Utc>,
    ) -> Result<(), HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = StreakUpdate {
            streak_current: to_db_count(streak.current()),
            streak_best: to_db_count(streak.best()),
            last_checkin_date: streak.last_checkin().map(CalendarDay::date),
            updated_at,
        };
        let updated = diesel::update(habits::table.find(*habit_id))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(HabitRepositoryError::query(format!(
                "habit {habit_id} missing during streak update"
            )));
        }
        Ok(())
    }

    async fn delete_owned(
        &self,
        owner: &OwnerId,
        habit_id: &Uuid,
    ) -> Result<bool, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            habits::table
                .filter(habits::id.eq(*habit_id))
                .filter(habits::owner_id.eq(owner.as_str())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn list_due_reminders(
        &self,
        at: ReminderTime,
    ) -> Result<Vec<Habit>, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<HabitRow> = habits::table
            .filter(habits::reminder_enabled.eq(true))
            .filter(habits::reminder_time.eq(at.time()))
            .select(HabitRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_habits(rows)
    }
}

//! Diesel row structs; never exposed outside the persistence module.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    achievements, checkins, habits, mood_notes, notifications, shared_progress, user_preferences,
};

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = habits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HabitRow {
    pub id: Uuid,
    pub owner_id: String,
    pub owner_email: Option<String>,
    pub title: String,
    pub description: String,
    pub frequency: String,
    pub streak_current: i32,
    pub streak_best: i32,
    pub last_checkin_date: Option<NaiveDate>,
    pub reminder_enabled: bool,
    pub reminder_time: Option<NaiveTime>,
    pub reminder_timezone: String,
    pub reminder_channels: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owner-editable columns; streak columns are deliberately absent.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = habits)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct HabitUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub frequency: &'a str,
    pub reminder_enabled: bool,
    pub reminder_time: Option<NaiveTime>,
    pub reminder_timezone: &'a str,
    pub reminder_channels: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = habits)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct StreakUpdate {
    pub streak_current: i32,
    pub streak_best: i32,
    pub last_checkin_date: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = checkins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CheckinRow {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub owner_id: String,
    pub day: NaiveDate,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = achievements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AchievementRow {
    pub id: Uuid,
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub kind: String,
    pub criteria: serde_json::Value,
    pub badge_svg: String,
    pub awarded_on: NaiveDate,
    pub habit_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = mood_notes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MoodNoteRow {
    pub id: Uuid,
    pub owner_id: String,
    pub day: NaiveDate,
    pub emoji: String,
    pub note: String,
    pub sentiment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: Uuid,
    pub owner_id: String,
    pub habit_id: Uuid,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub scheduled_for: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// `created_at` is left to the column default and never rewritten.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NewUserPreferencesRow {
    pub owner_id: String,
    pub theme: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserPreferencesRow {
    pub owner_id: String,
    pub theme: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = shared_progress)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SharedProgressRow {
    pub token: String,
    pub owner_id: String,
    pub habit_id: Option<Uuid>,
    pub image_url: String,
    pub shared_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

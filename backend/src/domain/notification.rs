//! Owner-scoped notifications.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::habit::Habit;
use super::user::OwnerId;

/// Unknown notification kind label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown notification kind: {0}")]
pub struct UnknownNotificationKind(pub String);

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Reminder,
    Achievement,
    Streak,
}

impl NotificationKind {
    /// Storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reminder => "reminder",
            Self::Achievement => "achievement",
            Self::Streak => "streak",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = UnknownNotificationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reminder" => Ok(Self::Reminder),
            "achievement" => Ok(Self::Achievement),
            "streak" => Ok(Self::Streak),
            other => Err(UnknownNotificationKind(other.to_owned())),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message for one owner about one habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    #[serde(rename = "ownerId")]
    pub owner: OwnerId,
    pub habit_id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub scheduled_for: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Unread reminder for `habit`, scheduled for `now`.
    #[must_use]
    pub fn reminder(id: Uuid, habit: &Habit, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner: habit.owner().clone(),
            habit_id: habit.id(),
            kind: NotificationKind::Reminder,
            title: "Habit reminder".to_owned(),
            message: reminder_message(habit),
            read: false,
            scheduled_for: now,
            created_at: now,
        }
    }
}

/// Body used by every reminder channel.
#[must_use]
pub fn reminder_message(habit: &Habit) -> String {
    format!("Time to complete your habit: {}", habit.title())
}

/// Listing filter for notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotificationFilter {
    /// Restrict to read (`Some(true)`) or unread (`Some(false)`) entries.
    pub read: Option<bool>,
}

impl NotificationFilter {
    /// Whether `notification` passes the filter.
    #[must_use]
    pub fn matches(&self, notification: &Notification) -> bool {
        self.read.is_none_or(|read| notification.read == read)
    }
}

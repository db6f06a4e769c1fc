//! Habit aggregate and its validated field types.
//!
//! Streak fields are owned by the check-in flow; title, description,
//! frequency, and reminder settings are edited directly by the owner.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::streak::StreakState;
use super::user::OwnerId;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 100;
/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;
const MAX_TIMEZONE_LEN: usize = 64;
const DEFAULT_TIMEZONE: &str = "UTC";

/// Validation errors for habit fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HabitValidationError {
    /// Title is blank after trimming.
    #[error("title is required")]
    EmptyTitle,
    /// Title exceeds [`MAX_TITLE_LEN`].
    #[error("title must be at most {max} characters")]
    TitleTooLong {
        /// Limit that was exceeded.
        max: usize,
    },
    /// Description exceeds [`MAX_DESCRIPTION_LEN`].
    #[error("description must be at most {max} characters")]
    DescriptionTooLong {
        /// Limit that was exceeded.
        max: usize,
    },
    /// Frequency is not daily, weekly, or monthly.
    #[error("frequency must be daily, weekly, or monthly, got {value}")]
    UnknownFrequency {
        /// Rejected input.
        value: String,
    },
    /// Reminder time is not `HH:MM`.
    #[error("reminder time must use HH:MM, got {value}")]
    InvalidReminderTime {
        /// Rejected input.
        value: String,
    },
    /// Reminder channel is not email or in-app.
    #[error("reminder channel must be email or in-app, got {value}")]
    UnknownChannel {
        /// Rejected input.
        value: String,
    },
    /// An enabled reminder needs a time of day.
    #[error("an enabled reminder requires a time")]
    ReminderWithoutTime,
    /// An enabled reminder needs at least one channel.
    #[error("an enabled reminder requires at least one channel")]
    ReminderWithoutChannels,
    /// Timezone label is blank or oversized.
    #[error("timezone must be between 1 and {max} characters")]
    InvalidTimezone {
        /// Limit that was exceeded.
        max: usize,
    },
}

/// Trimmed, non-empty habit title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HabitTitle(String);

impl HabitTitle {
    /// Trim and validate a title.
    ///
    /// # Errors
    ///
    /// Returns [`HabitValidationError::EmptyTitle`] or
    /// [`HabitValidationError::TitleTooLong`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, HabitValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(HabitValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > MAX_TITLE_LEN {
            return Err(HabitValidationError::TitleTooLong { max: MAX_TITLE_LEN });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the title.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed free-text description; empty when not provided.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct HabitDescription(String);

impl HabitDescription {
    /// Trim and validate a description.
    ///
    /// # Errors
    ///
    /// Returns [`HabitValidationError::DescriptionTooLong`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, HabitValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(HabitValidationError::DescriptionTooLong {
                max: MAX_DESCRIPTION_LEN,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the description.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How often the owner intends to perform the habit.
///
/// Frequency is informational: streaks and completion rates are always
/// computed per calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every day.
    #[default]
    Daily,
    /// Once a week.
    Weekly,
    /// Once a month.
    Monthly,
}

impl Frequency {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl FromStr for Frequency {
    type Err = HabitValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(HabitValidationError::UnknownFrequency {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reminder delivery channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReminderChannel {
    /// Email to the owner's verified address.
    #[serde(rename = "email")]
    Email,
    /// Stored notification plus live push.
    #[serde(rename = "in-app")]
    InApp,
}

impl ReminderChannel {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::InApp => "in-app",
        }
    }
}

impl FromStr for ReminderChannel {
    type Err = HabitValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "in-app" => Ok(Self::InApp),
            other => Err(HabitValidationError::UnknownChannel {
                value: other.to_owned(),
            }),
        }
    }
}

/// Minute-resolution time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReminderTime(NaiveTime);

impl ReminderTime {
    /// Truncate a wall-clock time to the minute.
    #[must_use]
    pub fn from_time(time: NaiveTime) -> Self {
        Self(
            NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(NaiveTime::MIN),
        )
    }

    /// Underlying time.
    #[must_use]
    pub const fn time(self) -> NaiveTime {
        self.0
    }
}

impl FromStr for ReminderTime {
    type Err = HabitValidationError;

    /// Parse a strict 24-hour `HH:MM` value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HabitValidationError::InvalidReminderTime {
            value: s.to_owned(),
        };
        let (hours, minutes) = s.split_once(':').ok_or_else(invalid)?;
        if hours.len() != 2 || minutes.len() != 2 {
            return Err(invalid());
        }
        let hours: u32 = hours.parse().map_err(|_| invalid())?;
        let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
        NaiveTime::from_hms_opt(hours, minutes, 0)
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// Reminder settings of one habit.
///
/// ## Invariants
/// - An enabled reminder has a time and at least one channel.
/// - Channels are unique and sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderConfig {
    enabled: bool,
    time: Option<ReminderTime>,
    timezone: String,
    channels: Vec<ReminderChannel>,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            time: None,
            timezone: DEFAULT_TIMEZONE.to_owned(),
            channels: vec![ReminderChannel::InApp],
        }
    }
}

impl ReminderConfig {
    /// Validate reminder settings.
    ///
    /// # Errors
    ///
    /// Returns [`HabitValidationError`] when an enabled reminder lacks a time
    /// or channels, or when the timezone label is unusable.
    pub fn new(
        enabled: bool,
        time: Option<ReminderTime>,
        timezone: Option<String>,
        mut channels: Vec<ReminderChannel>,
    ) -> Result<Self, HabitValidationError> {
        let timezone = timezone
            .map(|raw| raw.trim().to_owned())
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_owned());
        if timezone.is_empty() || timezone.chars().count() > MAX_TIMEZONE_LEN {
            return Err(HabitValidationError::InvalidTimezone {
                max: MAX_TIMEZONE_LEN,
            });
        }
        channels.sort_unstable();
        channels.dedup();
        if enabled && time.is_none() {
            return Err(HabitValidationError::ReminderWithoutTime);
        }
        if enabled && channels.is_empty() {
            return Err(HabitValidationError::ReminderWithoutChannels);
        }
        Ok(Self {
            enabled,
            time,
            timezone,
            channels,
        })
    }

    /// Whether reminders are switched on.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Time of day the reminder fires.
    #[must_use]
    pub const fn time(&self) -> Option<ReminderTime> {
        self.time
    }

    /// Timezone label chosen by the owner.
    #[must_use]
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Delivery channels.
    #[must_use]
    pub fn channels(&self) -> &[ReminderChannel] {
        &self.channels
    }

    /// Whether the reminder fires at `at`.
    #[must_use]
    pub fn is_due_at(&self, at: ReminderTime) -> bool {
        self.enabled && self.time == Some(at)
    }

    /// Whether `channel` is selected.
    #[must_use]
    pub fn delivers_via(&self, channel: ReminderChannel) -> bool {
        self.channels.contains(&channel)
    }
}

/// Fields needed to build a [`Habit`].
#[derive(Debug, Clone)]
pub struct HabitDraft {
    pub id: Uuid,
    pub owner: OwnerId,
    pub owner_email: Option<String>,
    pub title: HabitTitle,
    pub description: HabitDescription,
    pub frequency: Frequency,
    pub streak: StreakState,
    pub reminder: ReminderConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owner edits applied through the habit update endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitChanges {
    pub title: Option<HabitTitle>,
    pub description: Option<HabitDescription>,
    pub frequency: Option<Frequency>,
}

impl HabitChanges {
    /// Whether no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.frequency.is_none()
    }
}

/// A named recurring activity owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Habit {
    id: Uuid,
    owner: OwnerId,
    owner_email: Option<String>,
    title: HabitTitle,
    description: HabitDescription,
    frequency: Frequency,
    streak: StreakState,
    reminder: ReminderConfig,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<HabitDraft> for Habit {
    fn from(draft: HabitDraft) -> Self {
        let HabitDraft {
            id,
            owner,
            owner_email,
            title,
            description,
            frequency,
            streak,
            reminder,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            owner,
            owner_email,
            title,
            description,
            frequency,
            streak,
            reminder,
            created_at,
            updated_at,
        }
    }
}

impl Habit {
    /// Identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Owning user.
    #[must_use]
    pub const fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Owner email captured at creation, used for reminder mail.
    #[must_use]
    pub fn owner_email(&self) -> Option<&str> {
        self.owner_email.as_deref()
    }

    /// Title.
    #[must_use]
    pub const fn title(&self) -> &HabitTitle {
        &self.title
    }

    /// Description, empty when unset.
    #[must_use]
    pub const fn description(&self) -> &HabitDescription {
        &self.description
    }

    /// Intended frequency.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Materialised streak fields.
    #[must_use]
    pub const fn streak(&self) -> &StreakState {
        &self.streak
    }

    /// Reminder settings.
    #[must_use]
    pub const fn reminder(&self) -> &ReminderConfig {
        &self.reminder
    }

    /// Creation instant.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification instant.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply owner edits.
    pub fn apply_changes(&mut self, changes: HabitChanges, now: DateTime<Utc>) {
        let HabitChanges {
            title,
            description,
            frequency,
        } = changes;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(frequency) = frequency {
            self.frequency = frequency;
        }
        self.updated_at = now;
    }

    /// Replace the reminder settings.
    pub fn replace_reminder(&mut self, reminder: ReminderConfig, now: DateTime<Utc>) {
        self.reminder = reminder;
        self.updated_at = now;
    }

    /// Store recomputed streak fields.
    pub fn record_streak(&mut self, streak: StreakState, now: DateTime<Utc>) {
        self.streak = streak;
        self.updated_at = now;
    }
}

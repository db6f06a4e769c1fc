//! Domain primitives, derivations, and services.
//!
//! Purpose: model habits, the check-in ledger, streaks, achievements, and
//! the read-only rollups derived from them, independent of transport and
//! storage. Services implement the driving ports in [`ports`] and depend
//! only on driven ports.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifiers.
//! - CalendarDay / DayBoundary / DayClock: day normalisation.
//! - advance_streak / current_streak_as_of: write and read streak paths.
//! - overview / habit_detail: 30-day rollups.
//! - ShareClaims / SharedProgress: seven-day public progress links.

pub mod achievement;
pub mod calendar;
pub mod checkin;
pub mod error;
pub mod habit;
pub mod mood;
pub mod notification;
pub mod ports;
pub mod preferences;
pub mod share;
pub mod stats;
pub mod streak;
pub mod suggestion;
pub mod trace_id;
pub mod user;

mod achievement_service;
mod checkin_service;
mod habit_service;
mod mood_service;
mod notification_service;
mod preferences_service;
mod reminder_dispatcher;
mod share_service;
mod stats_service;
mod suggestion_service;

pub use self::achievement::{
    Achievement, AchievementGrant, AchievementKind, AchievementRule, PERFECT_WEEK, RULES,
};
pub use self::achievement_service::{AchievementEvaluator, AchievementService};
pub use self::calendar::{CalendarDay, CalendarError, DayBoundary, DayClock, DayRange};
pub use self::checkin::{Checkin, ledger_days};
pub use self::checkin_service::{CheckinService, CheckinServicePorts};
pub use self::error::{Error, ErrorCode};
pub use self::habit::{
    Frequency, Habit, HabitChanges, HabitDescription, HabitDraft, HabitTitle,
    HabitValidationError, ReminderChannel, ReminderConfig, ReminderTime,
};
pub use self::habit_service::HabitService;
pub use self::mood::{
    MoodEmoji, MoodNote, MoodRange, MoodText, MoodValidationError, Sentiment, classify,
};
pub use self::mood_service::MoodService;
pub use self::notification::{Notification, NotificationFilter, NotificationKind};
pub use self::notification_service::NotificationService;
pub use self::preferences::{PreferencesValidationError, Theme, UserPreferences};
pub use self::preferences_service::PreferencesService;
pub use self::reminder_dispatcher::{
    ReminderDispatcher, ReminderDispatcherPorts, ReminderReport, spawn_reminder_loop,
};
pub use self::share::{
    SHARE_TTL_DAYS, ShareClaims, ShareImage, ShareLink, ShareValidationError, SharedProgress,
};
pub use self::share_service::{ShareService, ShareServicePorts};
pub use self::stats::{
    CompletionDay, DayActivity, HabitDetail, Overview, OverviewSummary, StatsPeriod, StreakSummary,
    habit_detail, overview,
};
pub use self::stats_service::{StatsService, StatsServicePorts};
pub use self::streak::{StreakError, StreakState, advance_streak, current_streak_as_of};
pub use self::suggestion::{Suggestion, suggestion_digest};
pub use self::suggestion_service::SuggestionService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Identity, OwnerId, OwnerValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use habitwise::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("habit not found"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;

//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are implemented by domain services
//! and called by inbound adapters. Driven ports (repositories, verifier,
//! mailer, publisher, suggestion source and cache, share token codec,
//! metrics) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod achievement_repository;
mod achievements_query;
mod checkin_command;
mod checkin_metrics;
mod checkin_query;
mod checkin_repository;
mod habit_command;
mod habit_query;
mod habit_repository;
mod identity_verifier;
mod insert_outcome;
mod mailer;
mod mood_command;
mod mood_note_repository;
mod mood_query;
mod notification_publisher;
mod notification_repository;
mod notifications_command;
mod notifications_query;
mod preferences_command;
mod preferences_query;
mod share_command;
mod share_query;
mod share_token_codec;
mod shared_progress_repository;
mod stats_query;
mod suggestion_cache;
mod suggestion_query;
mod suggestion_source;
mod user_preferences_repository;

#[cfg(test)]
pub use achievement_repository::MockAchievementRepository;
pub use achievement_repository::{AchievementRepository, AchievementRepositoryError};
#[cfg(test)]
pub use achievements_query::MockAchievementsQuery;
pub use achievements_query::{AchievementListing, AchievementsQuery};
#[cfg(test)]
pub use checkin_command::MockCheckinCommand;
pub use checkin_command::{CheckinCommand, CheckinRecorded};
#[cfg(test)]
pub use checkin_metrics::MockCheckinMetrics;
pub use checkin_metrics::{CheckinMetrics, CheckinMetricsError, NoOpCheckinMetrics};
#[cfg(test)]
pub use checkin_query::MockCheckinQuery;
pub use checkin_query::{CheckinListing, CheckinQuery, TodayCheckin};
#[cfg(test)]
pub use checkin_repository::MockCheckinRepository;
pub use checkin_repository::{CheckinRepository, CheckinRepositoryError};
#[cfg(test)]
pub use habit_command::MockHabitCommand;
pub use habit_command::{
    CreateHabitRequest, HabitCommand, UpdateHabitRequest, UpdateReminderRequest,
};
#[cfg(test)]
pub use habit_query::MockHabitQuery;
pub use habit_query::HabitQuery;
#[cfg(test)]
pub use habit_repository::MockHabitRepository;
pub use habit_repository::{HabitRepository, HabitRepositoryError};
#[cfg(test)]
pub use identity_verifier::MockIdentityVerifier;
pub use identity_verifier::{IdentityVerifier, IdentityVerifierError};
pub use insert_outcome::InsertOutcome;
#[cfg(test)]
pub use mailer::MockMailer;
pub use mailer::{Mailer, MailerError, OutgoingMail};
#[cfg(test)]
pub use mood_command::MockMoodCommand;
pub use mood_command::{MoodCommand, RecordMoodRequest};
#[cfg(test)]
pub use mood_note_repository::MockMoodNoteRepository;
pub use mood_note_repository::{MoodNoteRepository, MoodNoteRepositoryError};
#[cfg(test)]
pub use mood_query::MockMoodQuery;
pub use mood_query::{MoodListing, MoodQuery};
#[cfg(test)]
pub use notification_publisher::MockNotificationPublisher;
pub use notification_publisher::{NoopNotificationPublisher, NotificationPublisher};
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::{NotificationRepository, NotificationRepositoryError};
#[cfg(test)]
pub use notifications_command::MockNotificationsCommand;
pub use notifications_command::NotificationsCommand;
#[cfg(test)]
pub use notifications_query::MockNotificationsQuery;
pub use notifications_query::NotificationsQuery;
#[cfg(test)]
pub use preferences_command::MockPreferencesCommand;
pub use preferences_command::PreferencesCommand;
#[cfg(test)]
pub use preferences_query::MockPreferencesQuery;
pub use preferences_query::PreferencesQuery;
#[cfg(test)]
pub use share_command::MockShareCommand;
pub use share_command::{CreateShareRequest, ShareCommand};
#[cfg(test)]
pub use share_query::MockShareQuery;
pub use share_query::ShareQuery;
#[cfg(test)]
pub use share_token_codec::MockShareTokenCodec;
pub use share_token_codec::{ShareTokenCodec, ShareTokenError};
#[cfg(test)]
pub use shared_progress_repository::MockSharedProgressRepository;
pub use shared_progress_repository::{SharedProgressRepository, SharedProgressRepositoryError};
#[cfg(test)]
pub use stats_query::MockStatsQuery;
pub use stats_query::StatsQuery;
#[cfg(test)]
pub use suggestion_cache::MockSuggestionCache;
pub use suggestion_cache::{
    SuggestionCache, SuggestionCacheError, SuggestionCacheKey, SuggestionCacheKeyError,
};
#[cfg(test)]
pub use suggestion_query::MockSuggestionQuery;
pub use suggestion_query::SuggestionQuery;
#[cfg(test)]
pub use suggestion_source::MockSuggestionSource;
pub use suggestion_source::{SuggestionSource, SuggestionSourceError};
#[cfg(test)]
pub use user_preferences_repository::MockUserPreferencesRepository;
pub use user_preferences_repository::{UserPreferencesRepository, UserPreferencesRepositoryError};

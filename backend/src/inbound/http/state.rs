//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::DayClock;
use crate::domain::ports::{
    AchievementsQuery, CheckinCommand, CheckinQuery, HabitCommand, HabitQuery, IdentityVerifier,
    MoodCommand, MoodQuery, NotificationsCommand, NotificationsQuery, PreferencesCommand,
    PreferencesQuery, ShareCommand, ShareQuery, StatsQuery, SuggestionQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub habits: Arc<dyn HabitCommand>,
    pub habits_query: Arc<dyn HabitQuery>,
    pub checkins: Arc<dyn CheckinCommand>,
    pub checkins_query: Arc<dyn CheckinQuery>,
    pub stats: Arc<dyn StatsQuery>,
    pub achievements: Arc<dyn AchievementsQuery>,
    pub moods: Arc<dyn MoodCommand>,
    pub moods_query: Arc<dyn MoodQuery>,
    pub notifications: Arc<dyn NotificationsCommand>,
    pub notifications_query: Arc<dyn NotificationsQuery>,
    pub suggestions: Arc<dyn SuggestionQuery>,
    pub preferences: Arc<dyn PreferencesCommand>,
    pub preferences_query: Arc<dyn PreferencesQuery>,
    pub shares: Arc<dyn ShareCommand>,
    pub shares_query: Arc<dyn ShareQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub habits: Arc<dyn HabitCommand>,
    pub habits_query: Arc<dyn HabitQuery>,
    pub checkins: Arc<dyn CheckinCommand>,
    pub checkins_query: Arc<dyn CheckinQuery>,
    pub stats: Arc<dyn StatsQuery>,
    pub achievements: Arc<dyn AchievementsQuery>,
    pub moods: Arc<dyn MoodCommand>,
    pub moods_query: Arc<dyn MoodQuery>,
    pub notifications: Arc<dyn NotificationsCommand>,
    pub notifications_query: Arc<dyn NotificationsQuery>,
    pub suggestions: Arc<dyn SuggestionQuery>,
    pub preferences: Arc<dyn PreferencesCommand>,
    pub preferences_query: Arc<dyn PreferencesQuery>,
    pub shares: Arc<dyn ShareCommand>,
    pub shares_query: Arc<dyn ShareQuery>,
    /// Verifies bearer tokens for the `Authenticated` extractor.
    pub identity: Arc<dyn IdentityVerifier>,
    /// Day boundary used to interpret `from`/`to` query dates.
    pub clock: DayClock,
}

impl HttpState {
    /// Construct state from the driving ports, the token verifier, and the
    /// service clock.
    pub fn new(ports: HttpStatePorts, identity: Arc<dyn IdentityVerifier>, clock: DayClock) -> Self {
        let HttpStatePorts {
            habits,
            habits_query,
            checkins,
            checkins_query,
            stats,
            achievements,
            moods,
            moods_query,
            notifications,
            notifications_query,
            suggestions,
            preferences,
            preferences_query,
            shares,
            shares_query,
        } = ports;
        Self {
            habits,
            habits_query,
            checkins,
            checkins_query,
            stats,
            achievements,
            moods,
            moods_query,
            notifications,
            notifications_query,
            suggestions,
            preferences,
            preferences_query,
            shares,
            shares_query,
            identity,
            clock,
        }
    }
}

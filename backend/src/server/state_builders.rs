//! Builders wiring repositories, services, and adapter state.

use std::sync::Arc;

use habitwise::domain::ports::{
    AchievementRepository, CheckinMetrics, CheckinRepository, HabitRepository,
    MoodNoteRepository, NoOpCheckinMetrics, NotificationRepository, SharedProgressRepository,
    UserPreferencesRepository,
};
use habitwise::domain::{
    AchievementEvaluator, AchievementService, CheckinService, CheckinServicePorts, DayClock,
    HabitService, MoodService, NotificationService, PreferencesService, ReminderDispatcher,
    ReminderDispatcherPorts, ShareService, ShareServicePorts, StatsService, StatsServicePorts,
    SuggestionService,
};
use habitwise::inbound::http::state::{HttpState, HttpStatePorts};
use habitwise::inbound::ws::NotificationHub;
use habitwise::inbound::ws::state::WsState;
use habitwise::outbound::memory::{
    InMemoryAchievementRepository, InMemoryCheckinRepository, InMemoryHabitRepository,
    InMemoryMoodNoteRepository, InMemoryNotificationRepository, InMemorySharedProgressRepository,
    InMemoryUserPreferencesRepository,
};
use habitwise::outbound::persistence::{
    DbPool, DieselAchievementRepository, DieselCheckinRepository, DieselHabitRepository,
    DieselMoodNoteRepository, DieselNotificationRepository, DieselSharedProgressRepository,
    DieselUserPreferencesRepository,
};
#[cfg(feature = "metrics")]
use habitwise::outbound::metrics::PrometheusCheckinMetrics;

use super::ServerConfig;

/// Driven repository ports shared by every service.
#[derive(Clone)]
pub(crate) struct Repositories {
    pub(crate) habits: Arc<dyn HabitRepository>,
    pub(crate) checkins: Arc<dyn CheckinRepository>,
    pub(crate) achievements: Arc<dyn AchievementRepository>,
    pub(crate) moods: Arc<dyn MoodNoteRepository>,
    pub(crate) notifications: Arc<dyn NotificationRepository>,
    pub(crate) preferences: Arc<dyn UserPreferencesRepository>,
    pub(crate) shares: Arc<dyn SharedProgressRepository>,
}

impl Repositories {
    /// Diesel adapters over one shared pool.
    fn diesel(pool: &DbPool) -> Self {
        Self {
            habits: Arc::new(DieselHabitRepository::new(pool.clone())),
            checkins: Arc::new(DieselCheckinRepository::new(pool.clone())),
            achievements: Arc::new(DieselAchievementRepository::new(pool.clone())),
            moods: Arc::new(DieselMoodNoteRepository::new(pool.clone())),
            notifications: Arc::new(DieselNotificationRepository::new(pool.clone())),
            preferences: Arc::new(DieselUserPreferencesRepository::new(pool.clone())),
            shares: Arc::new(DieselSharedProgressRepository::new(pool.clone())),
        }
    }

    /// Process-local stores; state is lost on restart.
    fn in_memory() -> Self {
        Self {
            habits: Arc::new(InMemoryHabitRepository::new()),
            checkins: Arc::new(InMemoryCheckinRepository::new()),
            achievements: Arc::new(InMemoryAchievementRepository::new()),
            moods: Arc::new(InMemoryMoodNoteRepository::new()),
            notifications: Arc::new(InMemoryNotificationRepository::new()),
            preferences: Arc::new(InMemoryUserPreferencesRepository::new()),
            shares: Arc::new(InMemorySharedProgressRepository::new()),
        }
    }

    pub(crate) fn from_config(config: &ServerConfig) -> Self {
        match &config.db_pool {
            Some(pool) => Self::diesel(pool),
            None => Self::in_memory(),
        }
    }
}

/// Adapter state and the background dispatcher built from one config.
pub(crate) struct BuiltState {
    pub(crate) http: HttpState,
    pub(crate) ws: WsState,
    pub(crate) reminders: Arc<ReminderDispatcher>,
}

/// Build check-in metrics, registering Prometheus counters when available.
///
/// # Errors
/// Returns [`std::io::Error`] if Prometheus metric registration fails.
#[cfg(feature = "metrics")]
fn build_checkin_metrics(config: &ServerConfig) -> std::io::Result<Arc<dyn CheckinMetrics>> {
    match &config.prometheus {
        Some(prom) => {
            let metrics = PrometheusCheckinMetrics::new(&prom.registry).map_err(|e| {
                std::io::Error::other(format!("check-in metrics registration failed: {e}"))
            })?;
            Ok(Arc::new(metrics))
        }
        None => Ok(Arc::new(NoOpCheckinMetrics)),
    }
}

#[cfg(not(feature = "metrics"))]
fn build_checkin_metrics(_config: &ServerConfig) -> std::io::Result<Arc<dyn CheckinMetrics>> {
    Ok(Arc::new(NoOpCheckinMetrics))
}

/// Wire services over `repos` and return the adapter state.
pub(crate) fn build_state(
    config: &ServerConfig,
    repos: &Repositories,
) -> std::io::Result<BuiltState> {
    let day_clock = DayClock::new(config.clock.clone(), config.day_boundary);
    let metrics = build_checkin_metrics(config)?;

    let habits = Arc::new(HabitService::new(repos.habits.clone(), config.clock.clone()));
    let evaluator = AchievementEvaluator::new(
        repos.habits.clone(),
        repos.achievements.clone(),
        metrics.clone(),
        config.clock.clone(),
    );
    let checkins = Arc::new(CheckinService::new(
        CheckinServicePorts {
            habits: repos.habits.clone(),
            checkins: repos.checkins.clone(),
            metrics,
        },
        evaluator,
        day_clock.clone(),
    ));
    let moods = Arc::new(MoodService::new(repos.moods.clone(), day_clock.clone()));
    let notifications = Arc::new(NotificationService::new(repos.notifications.clone()));
    let preferences = Arc::new(PreferencesService::new(
        repos.preferences.clone(),
        day_clock.clone(),
    ));
    let shares = Arc::new(ShareService::new(
        ShareServicePorts {
            habits: repos.habits.clone(),
            shares: repos.shares.clone(),
            tokens: config.share_tokens.clone(),
        },
        day_clock.clone(),
        config.public_base_url.clone(),
    ));

    let ports = HttpStatePorts {
        habits: habits.clone(),
        habits_query: habits,
        checkins: checkins.clone(),
        checkins_query: checkins,
        stats: Arc::new(StatsService::new(
            StatsServicePorts {
                habits: repos.habits.clone(),
                checkins: repos.checkins.clone(),
            },
            day_clock.clone(),
        )),
        achievements: Arc::new(AchievementService::new(repos.achievements.clone())),
        moods: moods.clone(),
        moods_query: moods,
        notifications: notifications.clone(),
        notifications_query: notifications,
        suggestions: Arc::new(SuggestionService::new(
            config.suggestions.clone(),
            config.cache.clone(),
            day_clock.clone(),
        )),
        preferences: preferences.clone(),
        preferences_query: preferences,
        shares: shares.clone(),
        shares_query: shares,
    };
    let http = HttpState::new(ports, config.identity.clone(), day_clock.clone());

    let hub = Arc::new(NotificationHub::new());
    let ws = WsState::new(
        config.identity.clone(),
        hub.clone(),
        config.ws_allowed_origins.iter(),
    );
    let reminders = Arc::new(ReminderDispatcher::new(
        ReminderDispatcherPorts {
            habits: repos.habits.clone(),
            notifications: repos.notifications.clone(),
            mailer: config.mailer.clone(),
            publisher: hub,
        },
        day_clock,
    ));

    Ok(BuiltState { http, ws, reminders })
}

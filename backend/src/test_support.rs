//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and the integration suites in `tests/`.
//! Compiled for `cfg(test)` and behind the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use zeroize::Zeroizing;

use crate::domain::ports::{
    Mailer, MailerError, NoOpCheckinMetrics, NotificationPublisher, OutgoingMail,
};
use crate::domain::{
    AchievementEvaluator, AchievementService, CheckinService, CheckinServicePorts, DayBoundary,
    DayClock, HabitService, MoodService, NotificationService, PreferencesService,
    ReminderDispatcher, ReminderDispatcherPorts, ShareService, ShareServicePorts, StatsService,
    StatsServicePorts, SuggestionService,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::identity::DevIdentityVerifier;
use crate::outbound::memory::{
    InMemoryAchievementRepository, InMemoryCheckinRepository, InMemoryHabitRepository,
    InMemoryMoodNoteRepository, InMemoryNotificationRepository, InMemorySharedProgressRepository,
    InMemoryUserPreferencesRepository,
};
use crate::outbound::share::JwtShareTokenCodec;
use crate::outbound::suggestion::CatalogueSuggestionSource;

/// Root of the share links issued by test backends.
pub const TEST_PUBLIC_BASE_URL: &str = "https://habitwise.test";

/// Share token secret common to every test backend.
const TEST_SHARE_SECRET: &str = "test-share-secret-with-enough-entropy";

/// Clock whose instant only moves when a test says so.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}"),
        };
        *self.lock_clock() += delta;
    }

    pub fn advance_days(&self, days: i64) {
        *self.lock_clock() += TimeDelta::days(days);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Mailer that keeps every message it is asked to send.
#[derive(Default)]
pub struct RecordingMailer(Mutex<Vec<OutgoingMail>>);

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingMail> {
        match self.0.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => panic!("mailer mutex"),
        }
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailerError> {
        match self.0.lock() {
            Ok(mut guard) => guard.push(mail.clone()),
            Err(_) => return Err(MailerError::transport("mailer mutex poisoned")),
        }
        Ok(())
    }
}

/// `Authorization` header accepted by [`DevIdentityVerifier`].
pub fn dev_bearer(owner: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer dev:{owner}"))
}

/// In-memory adapters plus a settable clock, wired the way the server wires
/// them when no database is configured.
pub struct MemoryBackend {
    pub habits: Arc<InMemoryHabitRepository>,
    pub checkins: Arc<InMemoryCheckinRepository>,
    pub achievements: Arc<InMemoryAchievementRepository>,
    pub moods: Arc<InMemoryMoodNoteRepository>,
    pub notifications: Arc<InMemoryNotificationRepository>,
    pub preferences: Arc<InMemoryUserPreferencesRepository>,
    pub shares: Arc<InMemorySharedProgressRepository>,
    pub clock: Arc<MutableClock>,
    pub day_clock: DayClock,
}

impl MemoryBackend {
    /// Empty stores with the clock set to `now` and days counted in UTC.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        let clock = Arc::new(MutableClock::new(now));
        let day_clock = DayClock::new(clock.clone(), DayBoundary::utc());
        Self {
            habits: Arc::new(InMemoryHabitRepository::new()),
            checkins: Arc::new(InMemoryCheckinRepository::new()),
            achievements: Arc::new(InMemoryAchievementRepository::new()),
            moods: Arc::new(InMemoryMoodNoteRepository::new()),
            notifications: Arc::new(InMemoryNotificationRepository::new()),
            preferences: Arc::new(InMemoryUserPreferencesRepository::new()),
            shares: Arc::new(InMemorySharedProgressRepository::new()),
            clock,
            day_clock,
        }
    }

    /// Check-in service sharing this backend's stores.
    pub fn checkin_service(&self) -> CheckinService {
        let evaluator = AchievementEvaluator::new(
            self.habits.clone(),
            self.achievements.clone(),
            Arc::new(NoOpCheckinMetrics),
            self.clock.clone(),
        );
        CheckinService::new(
            CheckinServicePorts {
                habits: self.habits.clone(),
                checkins: self.checkins.clone(),
                metrics: Arc::new(NoOpCheckinMetrics),
            },
            evaluator,
            self.day_clock.clone(),
        )
    }

    /// HTTP state over this backend, authenticating `dev:` tokens.
    pub fn http_state(&self) -> HttpState {
        let habits = Arc::new(HabitService::new(self.habits.clone(), self.clock.clone()));
        let checkins = Arc::new(self.checkin_service());
        let moods = Arc::new(MoodService::new(self.moods.clone(), self.day_clock.clone()));
        let notifications = Arc::new(NotificationService::new(self.notifications.clone()));
        let preferences = Arc::new(PreferencesService::new(
            self.preferences.clone(),
            self.day_clock.clone(),
        ));
        let shares = Arc::new(ShareService::new(
            ShareServicePorts {
                habits: self.habits.clone(),
                shares: self.shares.clone(),
                tokens: Arc::new(JwtShareTokenCodec::new(Zeroizing::new(
                    TEST_SHARE_SECRET.to_owned(),
                ))),
            },
            self.day_clock.clone(),
            TEST_PUBLIC_BASE_URL,
        ));
        let ports = HttpStatePorts {
            habits: habits.clone(),
            habits_query: habits,
            checkins: checkins.clone(),
            checkins_query: checkins,
            stats: Arc::new(StatsService::new(
                StatsServicePorts {
                    habits: self.habits.clone(),
                    checkins: self.checkins.clone(),
                },
                self.day_clock.clone(),
            )),
            achievements: Arc::new(AchievementService::new(self.achievements.clone())),
            moods: moods.clone(),
            moods_query: moods,
            notifications: notifications.clone(),
            notifications_query: notifications,
            suggestions: Arc::new(SuggestionService::new(
                Arc::new(CatalogueSuggestionSource::new()),
                None,
                self.day_clock.clone(),
            )),
            preferences: preferences.clone(),
            preferences_query: preferences,
            shares: shares.clone(),
            shares_query: shares,
        };
        HttpState::new(ports, Arc::new(DevIdentityVerifier), self.day_clock.clone())
    }

    /// Reminder dispatcher over this backend's habits and notifications.
    pub fn reminder_dispatcher(
        &self,
        mailer: Arc<dyn Mailer>,
        publisher: Arc<dyn NotificationPublisher>,
    ) -> ReminderDispatcher {
        ReminderDispatcher::new(
            ReminderDispatcherPorts {
                habits: self.habits.clone(),
                notifications: self.notifications.clone(),
                mailer,
                publisher,
            },
            self.day_clock.clone(),
        )
    }
}

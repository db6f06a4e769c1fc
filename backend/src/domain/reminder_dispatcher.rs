//! Background reminder delivery.
//!
//! Each tick formats "now" as `HH:MM` in the service reference frame and
//! delivers reminders for every habit whose enabled reminder matches. A
//! minute is dispatched at most once even when ticks arrive faster than
//! once a minute. Per-habit failures are logged and never stop the tick.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::notification::reminder_message;
use crate::domain::ports::{
    HabitRepository, Mailer, NotificationPublisher, NotificationRepository, OutgoingMail,
};
use crate::domain::{CalendarDay, DayClock, Habit, Notification, ReminderChannel, ReminderTime};

const REMINDER_SUBJECT: &str = "Habit reminder";

/// Driven ports used by [`ReminderDispatcher`].
#[derive(Clone)]
pub struct ReminderDispatcherPorts {
    pub habits: Arc<dyn HabitRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub publisher: Arc<dyn NotificationPublisher>,
}

/// Counts from one dispatch pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReminderReport {
    /// Habits whose reminder matched.
    pub due: usize,
    /// Emails accepted by the mailer.
    pub emails_sent: usize,
    /// In-app notifications stored.
    pub notifications_created: usize,
    /// Live sessions that received a pushed notification.
    pub pushed: usize,
    /// Deliveries that failed.
    pub failures: usize,
}

/// Delivers due reminders over email and in-app channels.
pub struct ReminderDispatcher {
    ports: ReminderDispatcherPorts,
    clock: DayClock,
    last_minute: Mutex<Option<(CalendarDay, ReminderTime)>>,
}

impl ReminderDispatcher {
    /// Create a dispatcher.
    pub fn new(ports: ReminderDispatcherPorts, clock: DayClock) -> Self {
        Self {
            ports,
            clock,
            last_minute: Mutex::new(None),
        }
    }

    fn already_dispatched(&self, minute: (CalendarDay, ReminderTime)) -> bool {
        *self
            .last_minute
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            == Some(minute)
    }

    /// Returns `false` when this minute was already dispatched.
    fn claim_minute(&self, minute: (CalendarDay, ReminderTime)) -> bool {
        let mut last = self
            .last_minute
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *last == Some(minute) {
            return false;
        }
        *last = Some(minute);
        true
    }

    /// Deliver reminders due at the current minute.
    pub async fn dispatch_due(&self) -> ReminderReport {
        let mut report = ReminderReport::default();
        let now = self.clock.now();
        let boundary = self.clock.boundary();
        let at = ReminderTime::from_time(boundary.time_of(now));
        let minute = (boundary.day_of(now), at);
        if self.already_dispatched(minute) {
            debug!(time = %at, "reminders already dispatched for this minute");
            return report;
        }

        let habits = match self.ports.habits.list_due_reminders(at).await {
            Ok(habits) => habits,
            Err(error) => {
                warn!(time = %at, error = %error, "failed to load due reminders");
                report.failures += 1;
                return report;
            }
        };
        // A failed load leaves the minute open so the next tick retries it.
        if !self.claim_minute(minute) {
            debug!(time = %at, "reminders already dispatched for this minute");
            return report;
        }
        report.due = habits.len();
        debug!(time = %at, due = report.due, "dispatching reminders");

        for habit in &habits {
            let reminder = habit.reminder();
            if reminder.delivers_via(ReminderChannel::Email) {
                self.send_email(habit, &mut report).await;
            }
            if reminder.delivers_via(ReminderChannel::InApp) {
                self.notify_in_app(habit, now, &mut report).await;
            }
        }
        report
    }

    async fn send_email(&self, habit: &Habit, report: &mut ReminderReport) {
        let Some(to) = habit.owner_email() else {
            debug!(habit_id = %habit.id(), "skipping email reminder without address");
            return;
        };
        let mail = OutgoingMail {
            to: to.to_owned(),
            subject: REMINDER_SUBJECT.to_owned(),
            body: reminder_message(habit),
        };
        match self.ports.mailer.send(&mail).await {
            Ok(()) => report.emails_sent += 1,
            Err(error) => {
                warn!(
                    owner = %habit.owner(),
                    habit_id = %habit.id(),
                    error = %error,
                    "email reminder failed"
                );
                report.failures += 1;
            }
        }
    }

    async fn notify_in_app(
        &self,
        habit: &Habit,
        now: chrono::DateTime<chrono::Utc>,
        report: &mut ReminderReport,
    ) {
        let notification = Notification::reminder(Uuid::new_v4(), habit, now);
        if let Err(error) = self.ports.notifications.create(&notification).await {
            warn!(
                owner = %habit.owner(),
                habit_id = %habit.id(),
                error = %error,
                "in-app reminder failed"
            );
            report.failures += 1;
            return;
        }
        report.notifications_created += 1;
        report.pushed += self.ports.publisher.publish(&notification);
    }
}

/// Run `dispatcher` every `every` on the current tokio runtime.
pub fn spawn_reminder_loop(dispatcher: Arc<ReminderDispatcher>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = every.as_secs(), "reminder dispatcher started");
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let report = dispatcher.dispatch_due().await;
            if report.due > 0 {
                info!(
                    due = report.due,
                    emails = report.emails_sent,
                    notifications = report.notifications_created,
                    pushed = report.pushed,
                    failures = report.failures,
                    "reminder tick complete"
                );
            }
        }
    })
}

#[cfg(test)]
#[path = "reminder_dispatcher_tests.rs"]
mod tests;

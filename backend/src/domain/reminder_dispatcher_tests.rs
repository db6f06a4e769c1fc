//! Tests for reminder dispatch.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockable::{Clock, MockClock};
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    HabitRepositoryError, MailerError, MockHabitRepository, MockMailer,
    MockNotificationPublisher, MockNotificationRepository, NotificationRepositoryError,
};
use crate::domain::{
    DayBoundary, Frequency, HabitDescription, HabitDraft, HabitTitle, OwnerId, ReminderConfig,
    StreakState,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 1, 7, 30, 42)
        .single()
        .expect("instant")
}

fn clock() -> DayClock {
    let mut clock = MockClock::new();
    clock.expect_utc().returning(now);
    let clock: Arc<dyn Clock> = Arc::new(clock);
    DayClock::new(clock, DayBoundary::utc())
}

fn habit(email: Option<&str>, channels: Vec<ReminderChannel>) -> Habit {
    let reminder = ReminderConfig::new(true, "07:30".parse().ok(), None, channels)
        .expect("reminder");
    Habit::from(HabitDraft {
        id: Uuid::new_v4(),
        owner: OwnerId::new("owner-1").expect("owner"),
        owner_email: email.map(str::to_owned),
        title: HabitTitle::new("Floss").expect("title"),
        description: HabitDescription::default(),
        frequency: Frequency::Daily,
        streak: StreakState::empty(),
        reminder,
        created_at: now(),
        updated_at: now(),
    })
}

struct Mocks {
    habits: MockHabitRepository,
    notifications: MockNotificationRepository,
    mailer: MockMailer,
    publisher: MockNotificationPublisher,
}

impl Mocks {
    fn new() -> Self {
        Self {
            habits: MockHabitRepository::new(),
            notifications: MockNotificationRepository::new(),
            mailer: MockMailer::new(),
            publisher: MockNotificationPublisher::new(),
        }
    }

    fn into_dispatcher(self) -> ReminderDispatcher {
        ReminderDispatcher::new(
            ReminderDispatcherPorts {
                habits: Arc::new(self.habits),
                notifications: Arc::new(self.notifications),
                mailer: Arc::new(self.mailer),
                publisher: Arc::new(self.publisher),
            },
            clock(),
        )
    }
}

#[rstest]
#[tokio::test]
async fn delivers_over_every_selected_channel() {
    let due = habit(
        Some("owner@example.test"),
        vec![ReminderChannel::Email, ReminderChannel::InApp],
    );
    let mut mocks = Mocks::new();
    mocks
        .habits
        .expect_list_due_reminders()
        .withf(|at| at.to_string() == "07:30")
        .return_once(move |_| Ok(vec![due]));
    mocks
        .mailer
        .expect_send()
        .withf(|mail| {
            mail.to == "owner@example.test"
                && mail.subject == "Habit reminder"
                && mail.body == "Time to complete your habit: Floss"
        })
        .times(1)
        .returning(|_| Ok(()));
    mocks
        .notifications
        .expect_create()
        .times(1)
        .returning(|_| Ok(()));
    mocks.publisher.expect_publish().times(1).return_const(1_usize);

    let report = mocks.into_dispatcher().dispatch_due().await;

    assert_eq!(
        report,
        ReminderReport {
            due: 1,
            emails_sent: 1,
            notifications_created: 1,
            pushed: 1,
            failures: 0,
        }
    );
}

#[rstest]
#[tokio::test]
async fn email_without_address_is_skipped() {
    let due = habit(None, vec![ReminderChannel::Email]);
    let mut mocks = Mocks::new();
    mocks
        .habits
        .expect_list_due_reminders()
        .return_once(move |_| Ok(vec![due]));
    mocks.mailer.expect_send().times(0);

    let report = mocks.into_dispatcher().dispatch_due().await;
    assert_eq!(report.emails_sent, 0);
    assert_eq!(report.failures, 0);
}

#[rstest]
#[tokio::test]
async fn one_failure_does_not_stop_the_tick() {
    let first = habit(Some("a@example.test"), vec![ReminderChannel::Email]);
    let second = habit(None, vec![ReminderChannel::InApp]);
    let mut mocks = Mocks::new();
    mocks
        .habits
        .expect_list_due_reminders()
        .return_once(move |_| Ok(vec![first, second]));
    mocks
        .mailer
        .expect_send()
        .returning(|_| Err(MailerError::transport("smtp down")));
    mocks.notifications.expect_create().returning(|_| Ok(()));
    mocks.publisher.expect_publish().return_const(0_usize);

    let report = mocks.into_dispatcher().dispatch_due().await;
    assert_eq!(report.failures, 1);
    assert_eq!(report.notifications_created, 1);
}

#[rstest]
#[tokio::test]
async fn unstored_notification_is_not_pushed() {
    let due = habit(None, vec![ReminderChannel::InApp]);
    let mut mocks = Mocks::new();
    mocks
        .habits
        .expect_list_due_reminders()
        .return_once(move |_| Ok(vec![due]));
    mocks
        .notifications
        .expect_create()
        .returning(|_| Err(NotificationRepositoryError::query("constraint")));
    mocks.publisher.expect_publish().times(0);

    let report = mocks.into_dispatcher().dispatch_due().await;
    assert_eq!(report.failures, 1);
    assert_eq!(report.pushed, 0);
}

#[rstest]
#[tokio::test]
async fn lookup_failure_is_reported() {
    let mut mocks = Mocks::new();
    mocks
        .habits
        .expect_list_due_reminders()
        .return_once(|_| Err(HabitRepositoryError::connection("down")));

    let report = mocks.into_dispatcher().dispatch_due().await;
    assert_eq!(report.failures, 1);
    assert_eq!(report.due, 0);
}

#[rstest]
#[tokio::test]
async fn the_same_minute_is_dispatched_once() {
    let mut mocks = Mocks::new();
    mocks
        .habits
        .expect_list_due_reminders()
        .times(1)
        .returning(|_| Ok(Vec::new()));
    let dispatcher = mocks.into_dispatcher();

    dispatcher.dispatch_due().await;
    let second = dispatcher.dispatch_due().await;
    assert_eq!(second, ReminderReport::default());
}

#[rstest]
#[tokio::test]
async fn failed_lookup_is_retried_within_the_same_minute() {
    let mut mocks = Mocks::new();
    let mut calls = mockall::Sequence::new();
    mocks
        .habits
        .expect_list_due_reminders()
        .times(1)
        .in_sequence(&mut calls)
        .return_once(|_| Err(HabitRepositoryError::connection("down")));
    mocks
        .habits
        .expect_list_due_reminders()
        .times(1)
        .in_sequence(&mut calls)
        .return_once(|_| Ok(vec![habit(Some("owner@example.test"), vec![ReminderChannel::Email])]));
    mocks.mailer.expect_send().times(1).returning(|_| Ok(()));
    let dispatcher = mocks.into_dispatcher();

    let failed = dispatcher.dispatch_due().await;
    let retried = dispatcher.dispatch_due().await;
    let repeated = dispatcher.dispatch_due().await;

    assert_eq!(failed.failures, 1);
    assert_eq!(retried.due, 1);
    assert_eq!(retried.emails_sent, 1);
    assert_eq!(repeated, ReminderReport::default());
}

//! Tests for the habit service.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockable::MockClock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockHabitRepository;
use crate::domain::{
    ErrorCode, Frequency, HabitChanges, HabitDescription, HabitTitle, Identity, ReminderChannel,
    ReminderConfig,
};

fn fixed_clock() -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().returning(|| {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
            .single()
            .expect("fixture instant")
    });
    Arc::new(clock)
}

#[fixture]
fn owner() -> OwnerId {
    OwnerId::new("owner-1").expect("owner")
}

fn stored_habit(owner: &OwnerId) -> Habit {
    let now = Utc
        .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("instant");
    Habit::from(HabitDraft {
        id: Uuid::new_v4(),
        owner: owner.clone(),
        owner_email: None,
        title: HabitTitle::new("Read").expect("title"),
        description: HabitDescription::default(),
        frequency: Frequency::Daily,
        streak: StreakState::new(2, 5, None).expect("streak"),
        reminder: ReminderConfig::default(),
        created_at: now,
        updated_at: now,
    })
}

#[rstest]
#[tokio::test]
async fn create_habit_starts_with_empty_streak(owner: OwnerId) {
    let mut repo = MockHabitRepository::new();
    repo.expect_create().times(1).return_once(|_| Ok(()));
    let service = HabitService::new(Arc::new(repo), fixed_clock());

    let identity =
        Identity::new(owner.clone(), Some("owner@example.test".to_owned())).expect("identity");
    let habit = service
        .create_habit(CreateHabitRequest {
            identity,
            title: HabitTitle::new("Stretch").expect("title"),
            description: HabitDescription::new("five minutes").expect("description"),
            frequency: Frequency::Weekly,
            reminder: ReminderConfig::default(),
        })
        .await
        .expect("create succeeds");

    assert_eq!(habit.owner(), &owner);
    assert_eq!(habit.owner_email(), Some("owner@example.test"));
    assert_eq!(habit.streak(), &StreakState::empty());
    assert_eq!(habit.frequency(), Frequency::Weekly);
    assert_eq!(habit.created_at(), habit.updated_at());
}

#[rstest]
#[tokio::test]
async fn get_habit_owned_by_someone_else_is_not_found(owner: OwnerId) {
    let mut repo = MockHabitRepository::new();
    repo.expect_find_owned().return_once(|_, _| Ok(None));
    let service = HabitService::new(Arc::new(repo), fixed_clock());

    let error = service
        .get_habit(&owner, Uuid::new_v4())
        .await
        .expect_err("missing habit");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_habit_keeps_streak_fields(owner: OwnerId) {
    let habit = stored_habit(&owner);
    let habit_id = habit.id();
    let mut repo = MockHabitRepository::new();
    repo.expect_find_owned()
        .return_once(move |_, _| Ok(Some(habit)));
    repo.expect_update()
        .withf(|habit| habit.title().as_str() == "Read more")
        .return_once(|_| Ok(true));
    let service = HabitService::new(Arc::new(repo), fixed_clock());

    let updated = service
        .update_habit(UpdateHabitRequest {
            owner,
            habit_id,
            changes: HabitChanges {
                title: Some(HabitTitle::new("Read more").expect("title")),
                ..HabitChanges::default()
            },
        })
        .await
        .expect("update succeeds");

    assert_eq!(updated.streak().current(), 2);
    assert_eq!(updated.streak().best(), 5);
    assert_ne!(updated.updated_at(), updated.created_at());
}

#[rstest]
#[tokio::test]
async fn update_reminder_replaces_configuration(owner: OwnerId) {
    let habit = stored_habit(&owner);
    let habit_id = habit.id();
    let mut repo = MockHabitRepository::new();
    repo.expect_find_owned()
        .return_once(move |_, _| Ok(Some(habit)));
    repo.expect_update().return_once(|_| Ok(true));
    let service = HabitService::new(Arc::new(repo), fixed_clock());

    let reminder = ReminderConfig::new(
        true,
        "07:15".parse().ok(),
        None,
        vec![ReminderChannel::Email],
    )
    .expect("reminder");
    let updated = service
        .update_reminder(UpdateReminderRequest {
            owner,
            habit_id,
            reminder: reminder.clone(),
        })
        .await
        .expect("update succeeds");
    assert_eq!(updated.reminder(), &reminder);
}

#[rstest]
#[tokio::test]
async fn delete_missing_habit_is_not_found(owner: OwnerId) {
    let mut repo = MockHabitRepository::new();
    repo.expect_delete_owned().return_once(|_, _| Ok(false));
    let service = HabitService::new(Arc::new(repo), fixed_clock());

    let error = service
        .delete_habit(&owner, Uuid::new_v4())
        .await
        .expect_err("nothing deleted");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(HabitRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(HabitRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn list_maps_repository_errors(
    owner: OwnerId,
    #[case] failure: HabitRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockHabitRepository::new();
    repo.expect_list_for_owner()
        .return_once(move |_| Err(failure));
    let service = HabitService::new(Arc::new(repo), fixed_clock());

    let error = service.list_habits(&owner).await.expect_err("fails");
    assert_eq!(error.code(), expected);
}

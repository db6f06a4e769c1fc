//! Mood note service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{
    InsertOutcome, MoodCommand, MoodListing, MoodNoteRepository, MoodNoteRepositoryError,
    MoodQuery, RecordMoodRequest,
};
use crate::domain::{DayClock, Error, MoodNote, MoodRange, OwnerId};

fn map_mood_repository_error(error: MoodNoteRepositoryError) -> Error {
    match error {
        MoodNoteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("mood note repository unavailable: {message}"))
        }
        MoodNoteRepositoryError::Query { message } => {
            Error::internal(format!("mood note repository error: {message}"))
        }
    }
}

fn duplicate_mood(existing: &MoodNote) -> Error {
    let error = Error::conflict("mood already recorded today");
    match serde_json::to_value(existing) {
        Ok(note) => error.with_details(json!({ "moodNote": note })),
        Err(err) => {
            warn!(error = %err, "failed to serialise existing mood note");
            error
        }
    }
}

/// Mood service implementing the mood driving ports.
pub struct MoodService<R: ?Sized> {
    notes: Arc<R>,
    clock: DayClock,
}

impl<R: ?Sized> MoodService<R> {
    /// Create a service over `notes`.
    pub fn new(notes: Arc<R>, clock: DayClock) -> Self {
        Self { notes, clock }
    }
}

#[async_trait]
impl<R> MoodCommand for MoodService<R>
where
    R: MoodNoteRepository + ?Sized,
{
    async fn record_mood(&self, request: RecordMoodRequest) -> Result<MoodNote, Error> {
        let RecordMoodRequest { owner, emoji, note } = request;
        let candidate = MoodNote::record(
            Uuid::new_v4(),
            owner,
            self.clock.today(),
            emoji,
            note,
            self.clock.now(),
        );
        match self
            .notes
            .insert_if_absent(&candidate)
            .await
            .map_err(map_mood_repository_error)?
        {
            InsertOutcome::Inserted(stored) => Ok(stored),
            InsertOutcome::Duplicate(existing) => Err(duplicate_mood(&existing)),
        }
    }
}

#[async_trait]
impl<R> MoodQuery for MoodService<R>
where
    R: MoodNoteRepository + ?Sized,
{
    async fn list_moods(&self, owner: &OwnerId, range: MoodRange) -> Result<MoodListing, Error> {
        let mut mood_notes = self
            .notes
            .list_for_owner(owner, range.days(self.clock.today()))
            .await
            .map_err(map_mood_repository_error)?;
        mood_notes.sort_by(|a, b| b.day.cmp(&a.day));
        Ok(MoodListing {
            total: mood_notes.len(),
            mood_notes,
            range,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use mockable::{Clock, MockClock};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::MockMoodNoteRepository;
    use crate::domain::{
        CalendarDay, DayBoundary, DayRange, ErrorCode, MoodEmoji, MoodText, Sentiment,
    };

    #[fixture]
    fn clock() -> DayClock {
        let mut clock = MockClock::new();
        clock.expect_utc().returning(|| {
            Utc.with_ymd_and_hms(2026, 8, 20, 21, 0, 0)
                .single()
                .expect("instant")
        });
        let clock: Arc<dyn Clock> = Arc::new(clock);
        DayClock::new(clock, DayBoundary::utc())
    }

    fn request(note: &str) -> RecordMoodRequest {
        RecordMoodRequest {
            owner: OwnerId::new("owner-1").expect("owner"),
            emoji: MoodEmoji::new("🙂").expect("emoji"),
            note: MoodText::new(note).expect("note"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn record_classifies_and_dates_the_note(clock: DayClock) {
        let mut repo = MockMoodNoteRepository::new();
        repo.expect_insert_if_absent()
            .returning(|n| Ok(InsertOutcome::Inserted(n.clone())));
        let service = MoodService::new(Arc::new(repo), clock);

        let note = service
            .record_mood(request("happy and grateful"))
            .await
            .expect("recorded");
        assert_eq!(note.sentiment, Sentiment::Positive);
        assert_eq!(note.day, CalendarDay::from_ymd(2026, 8, 20).expect("day"));
    }

    #[rstest]
    #[tokio::test]
    async fn second_note_of_the_day_is_a_conflict(clock: DayClock) {
        let mut repo = MockMoodNoteRepository::new();
        repo.expect_insert_if_absent()
            .returning(|n| Ok(InsertOutcome::Duplicate(n.clone())));
        let service = MoodService::new(Arc::new(repo), clock);

        let error = service
            .record_mood(request(""))
            .await
            .expect_err("duplicate");
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert!(error.details().is_some_and(|d| d.get("moodNote").is_some()));
    }

    #[rstest]
    #[tokio::test]
    async fn listing_uses_range_relative_to_today(clock: DayClock) {
        let mut repo = MockMoodNoteRepository::new();
        repo.expect_list_for_owner()
            .withf(|_, range| {
                *range
                    == DayRange::between(
                        CalendarDay::from_ymd(2026, 8, 14).expect("day"),
                        CalendarDay::from_ymd(2026, 8, 20).expect("day"),
                    )
            })
            .return_once(|_, _| Ok(Vec::new()));
        let service = MoodService::new(Arc::new(repo), clock);

        let listing = service
            .list_moods(&OwnerId::new("owner-1").expect("owner"), MoodRange::Last7Days)
            .await
            .expect("listing");
        assert_eq!(listing.total, 0);
        assert_eq!(listing.range, MoodRange::Last7Days);
    }
}

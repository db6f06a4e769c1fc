//! PostgreSQL-backed `MoodNoteRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{InsertOutcome, MoodNoteRepository, MoodNoteRepositoryError};
use crate::domain::{CalendarDay, DayRange, MoodNote, OwnerId, Sentiment};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::MoodNoteRow;
use super::pool::{DbPool, PoolError};
use super::schema::mood_notes;

/// Diesel adapter for the `mood_notes` table.
#[derive(Clone)]
pub struct DieselMoodNoteRepository {
    pool: DbPool,
}

impl DieselMoodNoteRepository {
    /// Repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MoodNoteRepositoryError {
    map_basic_pool_error(error, MoodNoteRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> MoodNoteRepositoryError {
    map_basic_diesel_error(
        error,
        MoodNoteRepositoryError::query,
        MoodNoteRepositoryError::connection,
    )
}

fn note_to_row(note: &MoodNote) -> MoodNoteRow {
    MoodNoteRow {
        id: note.id,
        owner_id: note.owner.as_str().to_owned(),
        day: note.day.date(),
        emoji: note.emoji.clone(),
        note: note.note.clone(),
        sentiment: note.sentiment.as_str().to_owned(),
        created_at: note.created_at,
    }
}

fn row_to_note(row: MoodNoteRow) -> Result<MoodNote, MoodNoteRepositoryError> {
    let owner = OwnerId::new(row.owner_id).map_err(|err| {
        MoodNoteRepositoryError::query(format!("invalid mood_notes.owner_id: {err}"))
    })?;
    Ok(MoodNote {
        id: row.id,
        owner,
        day: CalendarDay::new(row.day),
        emoji: row.emoji,
        note: row.note,
        sentiment: Sentiment::from_label(&row.sentiment),
        created_at: row.created_at,
    })
}

#[async_trait]
impl MoodNoteRepository for DieselMoodNoteRepository {
    async fn insert_if_absent(
        &self,
        note: &MoodNote,
    ) -> Result<InsertOutcome<MoodNote>, MoodNoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let written = diesel::insert_into(mood_notes::table)
            .values(&note_to_row(note))
            .on_conflict((mood_notes::owner_id, mood_notes::day))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if written > 0 {
            return Ok(InsertOutcome::Inserted(note.clone()));
        }

        let existing: MoodNoteRow = mood_notes::table
            .filter(mood_notes::owner_id.eq(note.owner.as_str()))
            .filter(mood_notes::day.eq(note.day.date()))
            .select(MoodNoteRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_note(existing).map(InsertOutcome::Duplicate)
    }

    async fn list_for_owner(
        &self,
        owner: &OwnerId,
        range: DayRange,
    ) -> Result<Vec<MoodNote>, MoodNoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = mood_notes::table
            .filter(mood_notes::owner_id.eq(owner.as_str()))
            .into_boxed();
        if let Some(from) = range.from {
            query = query.filter(mood_notes::day.ge(from.date()));
        }
        if let Some(to) = range.to {
            query = query.filter(mood_notes::day.le(to.date()));
        }
        let rows: Vec<MoodNoteRow> = query
            .order(mood_notes::day.desc())
            .select(MoodNoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_note).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{MoodEmoji, MoodText};

    #[rstest]
    fn row_conversion_preserves_note() {
        let note = MoodNote::record(
            Uuid::new_v4(),
            OwnerId::new("owner-1").expect("owner"),
            CalendarDay::from_ymd(2026, 4, 2).expect("day"),
            MoodEmoji::new("😊").expect("emoji"),
            MoodText::new("happy and grateful").expect("text"),
            Utc::now(),
        );
        let restored = row_to_note(note_to_row(&note)).expect("converts");
        assert_eq!(restored, note);
    }
}

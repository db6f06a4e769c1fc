//! In-memory mood journal.

use std::sync::Mutex;

use async_trait::async_trait;

use super::lock;
use crate::domain::ports::{InsertOutcome, MoodNoteRepository, MoodNoteRepositoryError};
use crate::domain::{DayRange, MoodNote, OwnerId};

/// Mood notes, one per `(owner, day)`.
#[derive(Debug, Default)]
pub struct InMemoryMoodNoteRepository {
    notes: Mutex<Vec<MoodNote>>,
}

impl InMemoryMoodNoteRepository {
    /// Empty journal.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MoodNoteRepository for InMemoryMoodNoteRepository {
    async fn insert_if_absent(
        &self,
        note: &MoodNote,
    ) -> Result<InsertOutcome<MoodNote>, MoodNoteRepositoryError> {
        let mut notes = lock(&self.notes, "mood note").map_err(MoodNoteRepositoryError::query)?;
        if let Some(existing) = notes
            .iter()
            .find(|stored| stored.owner == note.owner && stored.day == note.day)
        {
            return Ok(InsertOutcome::Duplicate(existing.clone()));
        }
        notes.push(note.clone());
        Ok(InsertOutcome::Inserted(note.clone()))
    }

    async fn list_for_owner(
        &self,
        owner: &OwnerId,
        range: DayRange,
    ) -> Result<Vec<MoodNote>, MoodNoteRepositoryError> {
        let notes = lock(&self.notes, "mood note").map_err(MoodNoteRepositoryError::query)?;
        let mut selected: Vec<MoodNote> = notes
            .iter()
            .filter(|n| &n.owner == owner && range.contains(n.day))
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.day.cmp(&a.day));
        Ok(selected)
    }
}

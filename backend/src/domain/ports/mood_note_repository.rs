//! Port for mood note persistence.

use async_trait::async_trait;

use crate::domain::{DayRange, MoodNote, OwnerId};

use super::{InsertOutcome, define_port_error};

define_port_error! {
    /// Errors raised by mood note repository adapters.
    pub enum MoodNoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "mood note repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "mood note repository query failed: {message}",
    }
}

/// Port for daily mood notes, unique per `(owner, day)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MoodNoteRepository: Send + Sync {
    /// Insert unless the owner already has a note for that day.
    async fn insert_if_absent(
        &self,
        note: &MoodNote,
    ) -> Result<InsertOutcome<MoodNote>, MoodNoteRepositoryError>;

    /// Notes within `range`, newest day first.
    async fn list_for_owner(
        &self,
        owner: &OwnerId,
        range: DayRange,
    ) -> Result<Vec<MoodNote>, MoodNoteRepositoryError>;
}

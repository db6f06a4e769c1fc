//! Driving port for recording mood notes.

use async_trait::async_trait;

use crate::domain::{Error, MoodEmoji, MoodNote, MoodText, OwnerId};

/// Validated mood input for today.
#[derive(Debug, Clone)]
pub struct RecordMoodRequest {
    pub owner: OwnerId,
    pub emoji: MoodEmoji,
    pub note: MoodText,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MoodCommand: Send + Sync {
    /// Record today's mood; `conflict` with `details.moodNote` when one
    /// already exists.
    async fn record_mood(&self, request: RecordMoodRequest) -> Result<MoodNote, Error>;
}

//! Driving port for listing mood notes.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Error, MoodNote, MoodRange, OwnerId};

/// Mood notes within a named range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodListing {
    pub mood_notes: Vec<MoodNote>,
    pub total: usize,
    pub range: MoodRange,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MoodQuery: Send + Sync {
    /// Notes within `range`, newest day first.
    async fn list_moods(&self, owner: &OwnerId, range: MoodRange) -> Result<MoodListing, Error>;
}

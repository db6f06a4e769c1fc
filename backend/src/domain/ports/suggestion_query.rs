//! Driving port for the daily suggestion.

use async_trait::async_trait;

use crate::domain::{Error, OwnerId, Suggestion};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionQuery: Send + Sync {
    /// Today's suggestion for `owner`. Falls back to a fixed suggestion
    /// rather than failing when the source is down.
    async fn daily_suggestion(&self, owner: &OwnerId) -> Result<Suggestion, Error>;
}

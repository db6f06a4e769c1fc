//! Port for producing daily habit suggestions.

use async_trait::async_trait;

use crate::domain::{CalendarDay, OwnerId, Suggestion};

use super::define_port_error;

define_port_error! {
    /// Errors raised by suggestion sources.
    pub enum SuggestionSourceError {
        /// Network or timeout failure talking to the upstream service.
        Transport { message: String } => "suggestion transport failed: {message}",
        /// Upstream answered with a non-success status.
        Status { status: u16 } => "suggestion service returned status {status}",
        /// Upstream payload could not be decoded or was incomplete.
        Decode { message: String } => "suggestion payload invalid: {message}",
    }
}

/// Produces one suggestion for an owner and day.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Suggest a habit for `owner` on `day`.
    async fn suggest(
        &self,
        owner: &OwnerId,
        day: CalendarDay,
    ) -> Result<Suggestion, SuggestionSourceError>;
}

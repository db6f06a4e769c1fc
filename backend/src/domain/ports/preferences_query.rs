//! Driving port for reading preferences.

use async_trait::async_trait;

use crate::domain::{Error, OwnerId, UserPreferences};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferencesQuery: Send + Sync {
    /// Saved preferences, or the defaults when nothing is stored.
    async fn preferences(&self, owner: &OwnerId) -> Result<UserPreferences, Error>;
}

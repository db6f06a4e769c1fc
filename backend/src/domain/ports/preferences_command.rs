//! Driving port for saving preferences.

use async_trait::async_trait;

use crate::domain::{Error, OwnerId, Theme, UserPreferences};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferencesCommand: Send + Sync {
    /// Save `theme` for `owner`, creating the row on first use.
    async fn update_preferences(
        &self,
        owner: &OwnerId,
        theme: Theme,
    ) -> Result<UserPreferences, Error>;
}

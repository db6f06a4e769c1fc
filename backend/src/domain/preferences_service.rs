//! Preference service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    PreferencesCommand, PreferencesQuery, UserPreferencesRepository,
    UserPreferencesRepositoryError,
};
use crate::domain::{DayClock, Error, OwnerId, Theme, UserPreferences};

fn map_preferences_repository_error(error: UserPreferencesRepositoryError) -> Error {
    match error {
        UserPreferencesRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("preferences repository unavailable: {message}"))
        }
        UserPreferencesRepositoryError::Query { message } => {
            Error::internal(format!("preferences repository error: {message}"))
        }
    }
}

/// Preference service implementing the preference driving ports.
pub struct PreferencesService<R: ?Sized> {
    preferences: Arc<R>,
    clock: DayClock,
}

impl<R: ?Sized> PreferencesService<R> {
    /// Create a service over `preferences`.
    pub fn new(preferences: Arc<R>, clock: DayClock) -> Self {
        Self { preferences, clock }
    }
}

#[async_trait]
impl<R> PreferencesQuery for PreferencesService<R>
where
    R: UserPreferencesRepository + ?Sized,
{
    async fn preferences(&self, owner: &OwnerId) -> Result<UserPreferences, Error> {
        let stored = self
            .preferences
            .find(owner)
            .await
            .map_err(map_preferences_repository_error)?;
        Ok(stored.unwrap_or_else(|| UserPreferences::defaults_for(owner.clone())))
    }
}

#[async_trait]
impl<R> PreferencesCommand for PreferencesService<R>
where
    R: UserPreferencesRepository + ?Sized,
{
    async fn update_preferences(
        &self,
        owner: &OwnerId,
        theme: Theme,
    ) -> Result<UserPreferences, Error> {
        let candidate = UserPreferences::saved(owner.clone(), theme, self.clock.now());
        self.preferences
            .upsert(&candidate)
            .await
            .map_err(map_preferences_repository_error)
    }
}

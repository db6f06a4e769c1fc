//! In-memory preference store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::lock;
use crate::domain::ports::{UserPreferencesRepository, UserPreferencesRepositoryError};
use crate::domain::{OwnerId, UserPreferences};

/// Preferences keyed by owner.
#[derive(Debug, Default)]
pub struct InMemoryUserPreferencesRepository {
    rows: Mutex<HashMap<OwnerId, UserPreferences>>,
}

impl InMemoryUserPreferencesRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserPreferencesRepository for InMemoryUserPreferencesRepository {
    async fn find(
        &self,
        owner: &OwnerId,
    ) -> Result<Option<UserPreferences>, UserPreferencesRepositoryError> {
        let rows = lock(&self.rows, "preferences").map_err(UserPreferencesRepositoryError::query)?;
        Ok(rows.get(owner).cloned())
    }

    async fn upsert(
        &self,
        preferences: &UserPreferences,
    ) -> Result<UserPreferences, UserPreferencesRepositoryError> {
        let mut rows =
            lock(&self.rows, "preferences").map_err(UserPreferencesRepositoryError::query)?;
        rows.insert(preferences.owner.clone(), preferences.clone());
        Ok(preferences.clone())
    }
}

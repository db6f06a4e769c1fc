//! Port for per-owner preference persistence.

use async_trait::async_trait;

use crate::domain::{OwnerId, UserPreferences};

use super::define_port_error;

define_port_error! {
    /// Errors raised by preference repository adapters.
    pub enum UserPreferencesRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "preferences repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "preferences repository query failed: {message}",
    }
}

/// Port for preferences, at most one row per owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserPreferencesRepository: Send + Sync {
    /// The owner's saved preferences, if any.
    async fn find(
        &self,
        owner: &OwnerId,
    ) -> Result<Option<UserPreferences>, UserPreferencesRepositoryError>;

    /// Insert or replace the owner's row and return what was stored.
    async fn upsert(
        &self,
        preferences: &UserPreferences,
    ) -> Result<UserPreferences, UserPreferencesRepositoryError>;
}

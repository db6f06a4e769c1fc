//! Port for achievement persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Achievement, AchievementKind, OwnerId};

use super::{InsertOutcome, define_port_error};

define_port_error! {
    /// Errors raised by achievement repository adapters.
    pub enum AchievementRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "achievement repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "achievement repository query failed: {message}",
    }
}

/// Port for one-time awards.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AchievementRepository: Send + Sync {
    /// Existing habit-scoped award of `kind`, if any.
    async fn find_for_habit(
        &self,
        owner: &OwnerId,
        kind: AchievementKind,
        habit_id: &Uuid,
    ) -> Result<Option<Achievement>, AchievementRepositoryError>;

    /// Insert unless an award with the same unique key exists.
    async fn insert_if_absent(
        &self,
        achievement: &Achievement,
    ) -> Result<InsertOutcome<Achievement>, AchievementRepositoryError>;

    /// `owner`'s awards, most recently awarded first.
    async fn list_for_owner(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<Achievement>, AchievementRepositoryError>;
}

//! Driving port for listing achievements.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Achievement, Error, OwnerId};

/// An owner's achievements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementListing {
    pub achievements: Vec<Achievement>,
    pub total: usize,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AchievementsQuery: Send + Sync {
    /// Achievements, most recently awarded first.
    async fn list_achievements(&self, owner: &OwnerId) -> Result<AchievementListing, Error>;
}

//! Driving port for statistics.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, HabitDetail, Overview, OwnerId};

/// Read-only rollups over the ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsQuery: Send + Sync {
    /// Cross-habit overview of the last 30 days.
    async fn overview(&self, owner: &OwnerId) -> Result<Overview, Error>;

    /// Per-habit detail; `not_found` when the habit is not owned.
    async fn habit_detail(&self, owner: &OwnerId, habit_id: Uuid) -> Result<HabitDetail, Error>;
}

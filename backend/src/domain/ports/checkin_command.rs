//! Driving port for recording check-ins.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Checkin, Error, OwnerId, StreakSummary};

/// A stored check-in with the habit's refreshed streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckinRecorded {
    pub checkin: Checkin,
    pub habit: StreakSummary,
}

/// Driving port for the check-in write path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckinCommand: Send + Sync {
    /// Record today's check-in for `habit_id`.
    ///
    /// Fails with `not_found` when the habit is not owned and with
    /// `conflict` when today is already checked in; the conflict carries the
    /// existing record under `details.checkin`.
    async fn record_checkin(&self, owner: &OwnerId, habit_id: Uuid)
    -> Result<CheckinRecorded, Error>;
}

//! Driving port for reading the check-in ledger.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Checkin, DayRange, Error, OwnerId, StreakSummary};

/// Check-ins of one habit within a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckinListing {
    pub checkins: Vec<Checkin>,
    pub total: usize,
    pub habit: StreakSummary,
}

/// Whether today is checked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayCheckin {
    pub has_checkin_today: bool,
    pub checkin: Option<Checkin>,
}

/// Driving port for ledger reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckinQuery: Send + Sync {
    /// Check-ins within `range`, newest day first.
    async fn list_checkins(
        &self,
        owner: &OwnerId,
        habit_id: Uuid,
        range: DayRange,
    ) -> Result<CheckinListing, Error>;

    /// Today's check-in, if any.
    async fn today_checkin(&self, owner: &OwnerId, habit_id: Uuid)
    -> Result<TodayCheckin, Error>;
}

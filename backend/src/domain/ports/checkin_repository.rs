//! Port for the check-in ledger.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{CalendarDay, Checkin, DayRange, OwnerId};

use super::{InsertOutcome, define_port_error};

define_port_error! {
    /// Errors raised by check-in repository adapters.
    pub enum CheckinRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "check-in repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "check-in repository query failed: {message}",
    }
}

/// Append-only ledger of check-ins.
///
/// Adapters enforce uniqueness of `(habit_id, owner, day)`; a collision is
/// reported as [`InsertOutcome::Duplicate`] carrying the stored record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckinRepository: Send + Sync {
    /// Insert unless a check-in already exists for the same habit, owner,
    /// and day.
    async fn insert_if_absent(
        &self,
        checkin: &Checkin,
    ) -> Result<InsertOutcome<Checkin>, CheckinRepositoryError>;

    /// Check-ins of one habit within `range`, newest day first.
    async fn list_for_habit(
        &self,
        owner: &OwnerId,
        habit_id: &Uuid,
        range: DayRange,
    ) -> Result<Vec<Checkin>, CheckinRepositoryError>;

    /// The check-in of one habit on `day`, if any.
    async fn find_on_day(
        &self,
        owner: &OwnerId,
        habit_id: &Uuid,
        day: CalendarDay,
    ) -> Result<Option<Checkin>, CheckinRepositoryError>;

    /// Check-ins across all of `owner`'s habits within `range`.
    async fn list_for_owner(
        &self,
        owner: &OwnerId,
        range: DayRange,
    ) -> Result<Vec<Checkin>, CheckinRepositoryError>;
}

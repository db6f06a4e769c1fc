//! In-memory check-in ledger.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::lock;
use crate::domain::ports::{CheckinRepository, CheckinRepositoryError, InsertOutcome};
use crate::domain::{CalendarDay, Checkin, DayRange, OwnerId};

/// Append-only ledger enforcing `(habit_id, owner, day)` uniqueness.
#[derive(Debug, Default)]
pub struct InMemoryCheckinRepository {
    ledger: Mutex<Vec<Checkin>>,
}

impl InMemoryCheckinRepository {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    fn select(
        &self,
        keep: impl Fn(&Checkin) -> bool,
    ) -> Result<Vec<Checkin>, CheckinRepositoryError> {
        let ledger = lock(&self.ledger, "check-in").map_err(CheckinRepositoryError::query)?;
        let mut rows: Vec<Checkin> = ledger.iter().filter(|c| keep(c)).cloned().collect();
        rows.sort_by(|a, b| b.day().cmp(&a.day()));
        Ok(rows)
    }
}

fn same_slot(a: &Checkin, b: &Checkin) -> bool {
    a.habit_id() == b.habit_id() && a.owner() == b.owner() && a.day() == b.day()
}

#[async_trait]
impl CheckinRepository for InMemoryCheckinRepository {
    async fn insert_if_absent(
        &self,
        checkin: &Checkin,
    ) -> Result<InsertOutcome<Checkin>, CheckinRepositoryError> {
        let mut ledger = lock(&self.ledger, "check-in").map_err(CheckinRepositoryError::query)?;
        if let Some(existing) = ledger.iter().find(|stored| same_slot(stored, checkin)) {
            return Ok(InsertOutcome::Duplicate(existing.clone()));
        }
        ledger.push(checkin.clone());
        Ok(InsertOutcome::Inserted(checkin.clone()))
    }

    async fn list_for_habit(
        &self,
        owner: &OwnerId,
        habit_id: &Uuid,
        range: DayRange,
    ) -> Result<Vec<Checkin>, CheckinRepositoryError> {
        self.select(|c| c.owner() == owner && c.habit_id() == *habit_id && range.contains(c.day()))
    }

    async fn find_on_day(
        &self,
        owner: &OwnerId,
        habit_id: &Uuid,
        day: CalendarDay,
    ) -> Result<Option<Checkin>, CheckinRepositoryError> {
        let rows = self.select(|c| c.owner() == owner && c.habit_id() == *habit_id && c.day() == day)?;
        Ok(rows.into_iter().next())
    }

    async fn list_for_owner(
        &self,
        owner: &OwnerId,
        range: DayRange,
    ) -> Result<Vec<Checkin>, CheckinRepositoryError> {
        self.select(|c| c.owner() == owner && range.contains(c.day()))
    }
}

//! Check-in ledger entries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::calendar::CalendarDay;
use super::user::OwnerId;

/// A fact: this habit was completed on this calendar day by this owner.
///
/// Check-ins are immutable once recorded. The ledger holds at most one per
/// `(habit_id, owner, day)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkin {
    id: Uuid,
    habit_id: Uuid,
    #[serde(rename = "ownerId")]
    owner: OwnerId,
    #[serde(rename = "date")]
    day: CalendarDay,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl Checkin {
    /// Record a completion for `day`.
    #[must_use]
    pub fn new(
        id: Uuid,
        habit_id: Uuid,
        owner: OwnerId,
        day: CalendarDay,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            habit_id,
            owner,
            day,
            completed: true,
            created_at,
        }
    }

    /// Identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Habit this check-in belongs to.
    #[must_use]
    pub const fn habit_id(&self) -> Uuid {
        self.habit_id
    }

    /// Owner.
    #[must_use]
    pub const fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Normalised calendar day.
    #[must_use]
    pub const fn day(&self) -> CalendarDay {
        self.day
    }

    /// Always `true`; kept for payload compatibility.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Insertion instant.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Days of a ledger, newest first.
#[must_use]
pub fn ledger_days(checkins: &[Checkin]) -> Vec<CalendarDay> {
    let mut days: Vec<CalendarDay> = checkins.iter().map(Checkin::day).collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();
    days
}

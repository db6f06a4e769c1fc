//! Statistics service.
//!
//! Reads the materialised streak fields for the cheap metrics and the raw
//! ledger for the per-day series; nothing is cached.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::checkin_service::map_checkin_repository_error;
use crate::domain::habit_service::{habit_not_found, map_habit_repository_error};
use crate::domain::ports::{CheckinRepository, HabitRepository, StatsQuery};
use crate::domain::{
    DayClock, DayRange, Error, HabitDetail, Overview, OwnerId, StatsPeriod, habit_detail,
    ledger_days, overview,
};

/// Driven ports used by [`StatsService`].
#[derive(Clone)]
pub struct StatsServicePorts {
    /// Habit persistence.
    pub habits: Arc<dyn HabitRepository>,
    /// Check-in ledger.
    pub checkins: Arc<dyn CheckinRepository>,
}

/// Stats service implementing [`StatsQuery`].
#[derive(Clone)]
pub struct StatsService {
    ports: StatsServicePorts,
    clock: DayClock,
}

impl StatsService {
    /// Create the service.
    pub fn new(ports: StatsServicePorts, clock: DayClock) -> Self {
        Self { ports, clock }
    }
}

#[async_trait]
impl StatsQuery for StatsService {
    async fn overview(&self, owner: &OwnerId) -> Result<Overview, Error> {
        let today = self.clock.today();
        let habits = self
            .ports
            .habits
            .list_for_owner(owner)
            .await
            .map_err(map_habit_repository_error)?;
        let window = self
            .ports
            .checkins
            .list_for_owner(owner, StatsPeriod::ending(today).range())
            .await
            .map_err(map_checkin_repository_error)?;
        Ok(overview(&habits, &window, today))
    }

    async fn habit_detail(&self, owner: &OwnerId, habit_id: Uuid) -> Result<HabitDetail, Error> {
        let today = self.clock.today();
        let habit = self
            .ports
            .habits
            .find_owned(owner, &habit_id)
            .await
            .map_err(map_habit_repository_error)?
            .ok_or_else(|| habit_not_found(habit_id))?;
        let ledger = self
            .ports
            .checkins
            .list_for_habit(owner, &habit_id, DayRange::unbounded())
            .await
            .map_err(map_checkin_repository_error)?;
        Ok(habit_detail(&habit, &ledger_days(&ledger), today))
    }
}

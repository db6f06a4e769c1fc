//! Check-in write path and ledger reads.
//!
//! Recording a check-in runs one sequential chain: insert into the ledger,
//! recompute the streak from the full ledger, persist it, then evaluate
//! achievements. The insert and the streak write are not transactional. If
//! the streak write fails the check-in stays recorded, the request fails,
//! and the next check-in recomputes the streak from the ledger.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::domain::habit_service::{habit_not_found, map_habit_repository_error};
use crate::domain::ports::{
    CheckinCommand, CheckinListing, CheckinMetrics, CheckinQuery, CheckinRecorded,
    CheckinRepository, CheckinRepositoryError, HabitRepository, InsertOutcome, TodayCheckin,
};
use crate::domain::{
    AchievementEvaluator, Checkin, DayClock, DayRange, Error, Habit, OwnerId, StreakSummary,
    advance_streak, ledger_days,
};

pub(crate) fn map_checkin_repository_error(error: CheckinRepositoryError) -> Error {
    match error {
        CheckinRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("check-in repository unavailable: {message}"))
        }
        CheckinRepositoryError::Query { message } => {
            Error::internal(format!("check-in repository error: {message}"))
        }
    }
}

fn duplicate_checkin(existing: &Checkin) -> Error {
    let error = Error::conflict("habit already checked in today");
    match serde_json::to_value(existing) {
        Ok(checkin) => error.with_details(json!({ "checkin": checkin })),
        Err(err) => {
            warn!(error = %err, "failed to serialise existing check-in");
            error
        }
    }
}

/// Driven ports used by [`CheckinService`].
#[derive(Clone)]
pub struct CheckinServicePorts {
    /// Habit persistence.
    pub habits: Arc<dyn HabitRepository>,
    /// Check-in ledger.
    pub checkins: Arc<dyn CheckinRepository>,
    /// Check-in counters.
    pub metrics: Arc<dyn CheckinMetrics>,
}

/// Check-in service implementing the check-in driving ports.
#[derive(Clone)]
pub struct CheckinService {
    ports: CheckinServicePorts,
    evaluator: AchievementEvaluator,
    clock: DayClock,
}

impl CheckinService {
    /// Create the service.
    pub fn new(ports: CheckinServicePorts, evaluator: AchievementEvaluator, clock: DayClock) -> Self {
        Self {
            ports,
            evaluator,
            clock,
        }
    }

    async fn load_owned(&self, owner: &OwnerId, habit_id: Uuid) -> Result<Habit, Error> {
        self.ports
            .habits
            .find_owned(owner, &habit_id)
            .await
            .map_err(map_habit_repository_error)?
            .ok_or_else(|| habit_not_found(habit_id))
    }

    async fn record_metric(&self, duplicate: bool) {
        let outcome = if duplicate {
            self.ports.metrics.record_duplicate().await
        } else {
            self.ports.metrics.record_checkin().await
        };
        if let Err(error) = outcome {
            warn!(error = %error, "failed to record check-in metric");
        }
    }
}

#[async_trait]
impl CheckinCommand for CheckinService {
    async fn record_checkin(
        &self,
        owner: &OwnerId,
        habit_id: Uuid,
    ) -> Result<CheckinRecorded, Error> {
        let today = self.clock.today();
        let mut habit = self.load_owned(owner, habit_id).await?;

        let candidate = Checkin::new(
            Uuid::new_v4(),
            habit_id,
            owner.clone(),
            today,
            self.clock.now(),
        );
        let checkin = match self
            .ports
            .checkins
            .insert_if_absent(&candidate)
            .await
            .map_err(map_checkin_repository_error)?
        {
            InsertOutcome::Inserted(stored) => stored,
            InsertOutcome::Duplicate(existing) => {
                self.record_metric(true).await;
                return Err(duplicate_checkin(&existing));
            }
        };
        self.record_metric(false).await;

        let ledger = self
            .ports
            .checkins
            .list_for_habit(owner, &habit_id, DayRange::unbounded())
            .await
            .map_err(map_checkin_repository_error)?;
        let streak = advance_streak(habit.streak(), &ledger_days(&ledger), today);
        let now = self.clock.now();
        self.ports
            .habits
            .save_streak(&habit_id, &streak, now)
            .await
            .map_err(map_habit_repository_error)?;
        habit.record_streak(streak, now);

        self.evaluator
            .check_achievements(owner, habit_id, today)
            .await;

        Ok(CheckinRecorded {
            checkin,
            habit: StreakSummary::from(&habit),
        })
    }
}

#[async_trait]
impl CheckinQuery for CheckinService {
    async fn list_checkins(
        &self,
        owner: &OwnerId,
        habit_id: Uuid,
        range: DayRange,
    ) -> Result<CheckinListing, Error> {
        let habit = self.load_owned(owner, habit_id).await?;
        let mut checkins = self
            .ports
            .checkins
            .list_for_habit(owner, &habit_id, range)
            .await
            .map_err(map_checkin_repository_error)?;
        checkins.sort_by(|a, b| b.day().cmp(&a.day()));
        Ok(CheckinListing {
            total: checkins.len(),
            checkins,
            habit: StreakSummary::from(&habit),
        })
    }

    async fn today_checkin(
        &self,
        owner: &OwnerId,
        habit_id: Uuid,
    ) -> Result<TodayCheckin, Error> {
        self.load_owned(owner, habit_id).await?;
        let checkin = self
            .ports
            .checkins
            .find_on_day(owner, &habit_id, self.clock.today())
            .await
            .map_err(map_checkin_repository_error)?;
        Ok(TodayCheckin {
            has_checkin_today: checkin.is_some(),
            checkin,
        })
    }
}

#[cfg(test)]
#[path = "checkin_service_tests.rs"]
mod tests;

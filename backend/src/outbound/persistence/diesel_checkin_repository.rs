//! PostgreSQL-backed `CheckinRepository`.
//!
//! Inserts use `ON CONFLICT DO NOTHING` against the
//! `(habit_id, owner_id, day)` unique index; when nothing is written the
//! stored row is fetched and returned as [`InsertOutcome::Duplicate`].

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CheckinRepository, CheckinRepositoryError, InsertOutcome};
use crate::domain::{CalendarDay, Checkin, DayRange, OwnerId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::CheckinRow;
use super::pool::{DbPool, PoolError};
use super::schema::checkins;

/// Diesel adapter for the `checkins` table.
#[derive(Clone)]
pub struct DieselCheckinRepository {
    pool: DbPool,
}

impl DieselCheckinRepository {
    /// Repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CheckinRepositoryError {
    map_basic_pool_error(error, CheckinRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CheckinRepositoryError {
    map_basic_diesel_error(
        error,
        CheckinRepositoryError::query,
        CheckinRepositoryError::connection,
    )
}

fn checkin_to_row(checkin: &Checkin) -> CheckinRow {
    CheckinRow {
        id: checkin.id(),
        habit_id: checkin.habit_id(),
        owner_id: checkin.owner().as_str().to_owned(),
        day: checkin.day().date(),
        completed: checkin.completed(),
        created_at: checkin.created_at(),
    }
}

fn row_to_checkin(row: CheckinRow) -> Result<Checkin, CheckinRepositoryError> {
    let owner = OwnerId::new(row.owner_id).map_err(|err| {
        CheckinRepositoryError::query(format!("invalid checkins.owner_id in database: {err}"))
    })?;
    Ok(Checkin::new(
        row.id,
        row.habit_id,
        owner,
        CalendarDay::new(row.day),
        row.created_at,
    ))
}

fn rows_to_checkins(rows: Vec<CheckinRow>) -> Result<Vec<Checkin>, CheckinRepositoryError> {
    rows.into_iter().map(row_to_checkin).collect()
}

/// Owner-scoped query narrowed to `range`.
fn owned_in_range<'a>(owner: &'a OwnerId, range: DayRange) -> checkins::BoxedQuery<'a, Pg> {
    let mut query = checkins::table
        .filter(checkins::owner_id.eq(owner.as_str()))
        .into_boxed();
    if let Some(from) = range.from {
        query = query.filter(checkins::day.ge(from.date()));
    }
    if let Some(to) = range.to {
        query = query.filter(checkins::day.le(to.date()));
    }
    query
}

#[async_trait]
impl CheckinRepository for DieselCheckinRepository {
    async fn insert_if_absent(
        &self,
        checkin: &Checkin,
    ) -> Result<InsertOutcome<Checkin>, CheckinRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let written = diesel::insert_into(checkins::table)
            .values(&checkin_to_row(checkin))
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if written > 0 {
            return Ok(InsertOutcome::Inserted(checkin.clone()));
        }

        let existing: CheckinRow = checkins::table
            .filter(checkins::habit_id.eq(checkin.habit_id()))
            .filter(checkins::owner_id.eq(checkin.owner().as_str()))
            .filter(checkins::day.eq(checkin.day().date()))
            .select(CheckinRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_checkin(existing).map(InsertOutcome::Duplicate)
    }

    async fn list_for_habit(
        &self,
        owner: &OwnerId,
        habit_id: &Uuid,
        range: DayRange,
    ) -> Result<Vec<Checkin>, CheckinRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CheckinRow> = owned_in_range(owner, range)
            .filter(checkins::habit_id.eq(*habit_id))
            .order(checkins::day.desc())
            .select(CheckinRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_checkins(rows)
    }

    async fn find_on_day(
        &self,
        owner: &OwnerId,
        habit_id: &Uuid,
        day: CalendarDay,
    ) -> Result<Option<Checkin>, CheckinRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CheckinRow> = checkins::table
            .filter(checkins::owner_id.eq(owner.as_str()))
            .filter(checkins::habit_id.eq(*habit_id))
            .filter(checkins::day.eq(day.date()))
            .select(CheckinRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_checkin).transpose()
    }

    async fn list_for_owner(
        &self,
        owner: &OwnerId,
        range: DayRange,
    ) -> Result<Vec<Checkin>, CheckinRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CheckinRow> = owned_in_range(owner, range)
            .order(checkins::day.desc())
            .select(CheckinRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_checkins(rows)
    }
}

//! Check-in handlers.
//!
//! ```text
//! POST /api/v1/habits/{id}/checkins
//! GET  /api/v1/habits/{id}/checkins?from=YYYY-MM-DD&to=YYYY-MM-DD
//! GET  /api/v1/habits/{id}/checkins/today
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{DayBoundary, DayRange};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::cache_control::owner_private;
use crate::inbound::http::habits::HABIT_ID;
use crate::inbound::http::schemas::{CheckinSchema, ErrorSchema, StreakSummarySchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, inverted_range_error, parse_optional_query_day, parse_uuid,
};

/// Optional inclusive bounds for the ledger listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CheckinRangeQuery {
    /// Earliest day, `YYYY-MM-DD`.
    pub from: Option<String>,
    /// Latest day, `YYYY-MM-DD`.
    pub to: Option<String>,
}

fn parse_range(query: &CheckinRangeQuery, boundary: &DayBoundary) -> ApiResult<DayRange> {
    let from = parse_optional_query_day(query.from.as_deref(), FieldName::new("from"), boundary)?;
    let to = parse_optional_query_day(query.to.as_deref(), FieldName::new("to"), boundary)?;
    if let (Some(from), Some(to)) = (from, to)
        && from > to
    {
        return Err(inverted_range_error(from, to));
    }
    Ok(DayRange { from, to })
}

/// Documentation shape of `POST /habits/{id}/checkins`.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation")]
pub struct CheckinRecordedSchema {
    checkin: CheckinSchema,
    habit: StreakSummarySchema,
}

/// Documentation shape of `GET /habits/{id}/checkins`.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation")]
pub struct CheckinListingSchema {
    checkins: Vec<CheckinSchema>,
    total: usize,
    habit: StreakSummarySchema,
}

/// Documentation shape of `GET /habits/{id}/checkins/today`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation")]
pub struct TodayCheckinSchema {
    has_checkin_today: bool,
    checkin: Option<CheckinSchema>,
}

/// Record today's completion of an owned habit.
///
/// A second check-in on the same day is rejected with status 400, code
/// `conflict`, and the existing record under `details.checkin`.
#[utoipa::path(
    post,
    path = "/api/v1/habits/{id}/checkins",
    params(("id" = Uuid, Path, description = "Habit identifier")),
    responses(
        (status = 201, description = "Check-in recorded", body = CheckinRecordedSchema),
        (status = 400, description = "Already checked in today, or malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Habit not found or not owned", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["checkins"],
    operation_id = "recordCheckin"
)]
#[post("/habits/{id}/checkins")]
pub async fn record_checkin(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let habit_id = parse_uuid(&path, HABIT_ID)?;
    let recorded = state.checkins.record_checkin(caller.owner(), habit_id).await?;
    Ok(HttpResponse::Created().json(recorded))
}

/// List check-ins for an owned habit, newest day first.
#[utoipa::path(
    get,
    path = "/api/v1/habits/{id}/checkins",
    params(("id" = Uuid, Path, description = "Habit identifier"), CheckinRangeQuery),
    responses(
        (status = 200, description = "Ledger entries", body = CheckinListingSchema),
        (status = 400, description = "Malformed or inverted range", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Habit not found or not owned", body = ErrorSchema)
    ),
    tags = ["checkins"],
    operation_id = "listCheckins"
)]
#[get("/habits/{id}/checkins")]
pub async fn list_checkins(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    query: web::Query<CheckinRangeQuery>,
) -> ApiResult<HttpResponse> {
    let habit_id = parse_uuid(&path, HABIT_ID)?;
    let range = parse_range(&query, &state.clock.boundary())?;
    let listing = state
        .checkins_query
        .list_checkins(caller.owner(), habit_id, range)
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header(owner_private())
        .json(listing))
}

/// Whether an owned habit already has today's check-in.
#[utoipa::path(
    get,
    path = "/api/v1/habits/{id}/checkins/today",
    params(("id" = Uuid, Path, description = "Habit identifier")),
    responses(
        (status = 200, description = "Today's check-in, if any", body = TodayCheckinSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Habit not found or not owned", body = ErrorSchema)
    ),
    tags = ["checkins"],
    operation_id = "todayCheckin"
)]
#[get("/habits/{id}/checkins/today")]
pub async fn today_checkin(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let habit_id = parse_uuid(&path, HABIT_ID)?;
    let today = state.checkins_query.today_checkin(caller.owner(), habit_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(owner_private())
        .json(today))
}

#[cfg(test)]
#[path = "checkins_tests.rs"]
mod tests;

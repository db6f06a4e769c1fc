//! Statistics handlers.
//!
//! ```text
//! GET /api/v1/stats/overview
//! GET /api/v1/stats/habits/{id}
//! ```

use actix_web::{HttpResponse, get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::cache_control::owner_private;
use crate::inbound::http::habits::HABIT_ID;
use crate::inbound::http::schemas::{ErrorSchema, HabitDetailSchema, OverviewSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_uuid;

/// Thirty-day rollup across every habit the caller owns.
#[utoipa::path(
    get,
    path = "/api/v1/stats/overview",
    responses(
        (status = 200, description = "Overview", body = OverviewSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["stats"],
    operation_id = "statsOverview"
)]
#[get("/stats/overview")]
pub async fn overview(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<HttpResponse> {
    let overview = state.stats.overview(caller.owner()).await?;
    Ok(HttpResponse::Ok()
        .insert_header(owner_private())
        .json(overview))
}

/// Thirty-day completion detail for one owned habit.
#[utoipa::path(
    get,
    path = "/api/v1/stats/habits/{id}",
    params(("id" = Uuid, Path, description = "Habit identifier")),
    responses(
        (status = 200, description = "Habit detail", body = HabitDetailSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Habit not found or not owned", body = ErrorSchema)
    ),
    tags = ["stats"],
    operation_id = "statsHabitDetail"
)]
#[get("/stats/habits/{id}")]
pub async fn habit_detail(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let habit_id = parse_uuid(&path, HABIT_ID)?;
    let detail = state.stats.habit_detail(caller.owner(), habit_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(owner_private())
        .json(detail))
}

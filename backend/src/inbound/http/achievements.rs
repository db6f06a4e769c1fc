//! Achievement listing handler.
//!
//! ```text
//! GET /api/v1/achievements
//! ```

use actix_web::{HttpResponse, get, web};
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::cache_control::owner_private;
use crate::inbound::http::schemas::{AchievementSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Documentation shape of `GET /achievements`.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation")]
pub struct AchievementListingSchema {
    achievements: Vec<AchievementSchema>,
    total: usize,
}

/// List the caller's achievements, most recently awarded first.
#[utoipa::path(
    get,
    path = "/api/v1/achievements",
    responses(
        (status = 200, description = "Awarded achievements", body = AchievementListingSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["achievements"],
    operation_id = "listAchievements"
)]
#[get("/achievements")]
pub async fn list_achievements(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<HttpResponse> {
    let listing = state.achievements.list_achievements(caller.owner()).await?;
    Ok(HttpResponse::Ok()
        .insert_header(owner_private())
        .json(listing))
}

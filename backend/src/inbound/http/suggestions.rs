//! Daily suggestion handler.
//!
//! ```text
//! GET /api/v1/suggestions/daily
//! ```

use actix_web::{HttpResponse, get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::cache_control::owner_private;
use crate::inbound::http::schemas::{ErrorSchema, SuggestionSchema};
use crate::inbound::http::state::HttpState;

/// Suggested habit for the caller today. Never fails once authenticated:
/// upstream failures yield a fixed fallback suggestion.
#[utoipa::path(
    get,
    path = "/api/v1/suggestions/daily",
    responses(
        (status = 200, description = "Today's suggestion", body = SuggestionSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["suggestions"],
    operation_id = "dailySuggestion"
)]
#[get("/suggestions/daily")]
pub async fn daily_suggestion(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<HttpResponse> {
    let suggestion = state.suggestions.daily_suggestion(caller.owner()).await?;
    Ok(HttpResponse::Ok()
        .insert_header(owner_private())
        .json(suggestion))
}

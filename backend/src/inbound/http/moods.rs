//! Mood note handlers.
//!
//! ```text
//! POST /api/v1/moods {"emoji":"🙂","note":"good run today"}
//! GET  /api/v1/moods?range=today|last7days|last30days|all
//! ```

use std::str::FromStr;

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::RecordMoodRequest;
use crate::domain::{MoodEmoji, MoodRange, MoodText, OwnerId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::cache_control::owner_private;
use crate::inbound::http::schemas::{ErrorSchema, MoodNoteSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, mood_validation_error};

/// Request body for `POST /api/v1/moods`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct RecordMoodBody {
    #[schema(example = "🙂")]
    pub emoji: Option<String>,
    /// Free text, at most 200 characters; defaults to empty.
    #[schema(example = "Great run this morning")]
    pub note: Option<String>,
}

/// Listing window for mood notes.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MoodRangeQuery {
    /// `today`, `last7days`, `last30days` (default), or `all`.
    pub range: Option<String>,
}

/// Documentation shape of `GET /moods`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation")]
pub struct MoodListingSchema {
    mood_notes: Vec<MoodNoteSchema>,
    total: usize,
    #[schema(example = "last30days")]
    range: String,
}

fn parse_record(owner: OwnerId, body: RecordMoodBody) -> ApiResult<RecordMoodRequest> {
    let emoji = body
        .emoji
        .ok_or_else(|| missing_field_error(FieldName::new("emoji")))?;
    Ok(RecordMoodRequest {
        owner,
        emoji: MoodEmoji::new(emoji).map_err(mood_validation_error)?,
        note: body
            .note
            .map(MoodText::new)
            .transpose()
            .map_err(mood_validation_error)?
            .unwrap_or_default(),
    })
}

fn parse_range(raw: Option<&str>) -> ApiResult<MoodRange> {
    raw.map(MoodRange::from_str)
        .transpose()
        .map(Option::unwrap_or_default)
        .map_err(mood_validation_error)
}

/// Record the caller's mood for today. One note per day.
#[utoipa::path(
    post,
    path = "/api/v1/moods",
    request_body = RecordMoodBody,
    responses(
        (status = 201, description = "Mood note recorded", body = MoodNoteSchema),
        (status = 400, description = "Invalid body, or already recorded today", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["moods"],
    operation_id = "recordMood"
)]
#[post("/moods")]
pub async fn record_mood(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<RecordMoodBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_record(caller.owner().clone(), payload.into_inner())?;
    let note = state.moods.record_mood(request).await?;
    Ok(HttpResponse::Created().json(note))
}

/// List the caller's mood notes in a window, newest day first.
#[utoipa::path(
    get,
    path = "/api/v1/moods",
    params(MoodRangeQuery),
    responses(
        (status = 200, description = "Mood notes", body = MoodListingSchema),
        (status = 400, description = "Unknown range", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["moods"],
    operation_id = "listMoods"
)]
#[get("/moods")]
pub async fn list_moods(
    state: web::Data<HttpState>,
    caller: Authenticated,
    query: web::Query<MoodRangeQuery>,
) -> ApiResult<HttpResponse> {
    let range = parse_range(query.range.as_deref())?;
    let listing = state.moods_query.list_moods(caller.owner(), range).await?;
    Ok(HttpResponse::Ok()
        .insert_header(owner_private())
        .json(listing))
}

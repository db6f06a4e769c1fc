//! Habit CRUD handlers.
//!
//! ```text
//! POST   /api/v1/habits
//! GET    /api/v1/habits
//! GET    /api/v1/habits/{id}
//! PUT    /api/v1/habits/{id}
//! PUT    /api/v1/habits/{id}/reminder
//! DELETE /api/v1/habits/{id}
//! ```
//!
//! Streak fields are read-only here; they only change through check-ins.

use std::str::FromStr;

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{CreateHabitRequest, UpdateHabitRequest, UpdateReminderRequest};
use crate::domain::{
    Error, Frequency, Habit, HabitChanges, HabitDescription, HabitTitle, Identity,
    ReminderChannel, ReminderConfig, ReminderTime,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::cache_control::owner_private;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, habit_validation_error, missing_field_error, parse_uuid,
};

pub(crate) const HABIT_ID: FieldName = FieldName::new("id");

/// Reminder settings as sent and returned by the API.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPayload {
    pub enabled: Option<bool>,
    /// Time of day as `HH:MM` (24h).
    #[schema(example = "07:30")]
    pub time: Option<String>,
    #[schema(example = "Europe/London")]
    pub timezone: Option<String>,
    /// Subset of `email` and `in-app`.
    pub channels: Option<Vec<String>>,
}

/// Request body for `POST /api/v1/habits`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHabitBody {
    #[schema(example = "Read 20 pages")]
    pub title: Option<String>,
    pub description: Option<String>,
    /// `daily`, `weekly`, or `monthly`; defaults to `daily`.
    pub frequency: Option<String>,
    pub reminder: Option<ReminderPayload>,
}

/// Request body for `PUT /api/v1/habits/{id}`; omitted fields are kept.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHabitBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<String>,
}

/// Reminder configuration as stored on a habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub enabled: bool,
    pub time: Option<String>,
    pub timezone: String,
    pub channels: Vec<String>,
}

impl From<&ReminderConfig> for ReminderResponse {
    fn from(reminder: &ReminderConfig) -> Self {
        Self {
            enabled: reminder.enabled(),
            time: reminder.time().map(|time| time.to_string()),
            timezone: reminder.timezone().to_owned(),
            channels: reminder
                .channels()
                .iter()
                .map(|channel| channel.as_str().to_owned())
                .collect(),
        }
    }
}

/// Habit as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HabitResponse {
    pub id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    #[schema(example = "daily")]
    pub frequency: String,
    pub streak_current: u32,
    pub streak_best: u32,
    #[schema(example = "2026-03-04")]
    pub last_checkin_date: Option<String>,
    pub reminder: ReminderResponse,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Habit> for HabitResponse {
    fn from(habit: &Habit) -> Self {
        Self {
            id: habit.id(),
            owner_id: habit.owner().to_string(),
            title: habit.title().as_str().to_owned(),
            description: habit.description().as_str().to_owned(),
            frequency: habit.frequency().as_str().to_owned(),
            streak_current: habit.streak().current(),
            streak_best: habit.streak().best(),
            last_checkin_date: habit.streak().last_checkin().map(|day| day.to_string()),
            reminder: ReminderResponse::from(habit.reminder()),
            created_at: habit.created_at().to_rfc3339(),
            updated_at: habit.updated_at().to_rfc3339(),
        }
    }
}

/// `{habits, total}` listing envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HabitListResponse {
    pub habits: Vec<HabitResponse>,
    pub total: usize,
}

fn parse_frequency(raw: Option<String>) -> Result<Option<Frequency>, Error> {
    raw.map(|value| Frequency::from_str(&value).map_err(habit_validation_error))
        .transpose()
}

fn parse_description(raw: Option<String>) -> Result<Option<HabitDescription>, Error> {
    raw.map(|value| HabitDescription::new(value).map_err(habit_validation_error))
        .transpose()
}

pub(crate) fn parse_reminder(payload: ReminderPayload) -> Result<ReminderConfig, Error> {
    let time = payload
        .time
        .map(|raw| ReminderTime::from_str(&raw).map_err(habit_validation_error))
        .transpose()?;
    let channels = match payload.channels {
        Some(values) => values
            .iter()
            .map(|raw| ReminderChannel::from_str(raw).map_err(habit_validation_error))
            .collect::<Result<Vec<_>, _>>()?,
        None => vec![ReminderChannel::InApp],
    };
    ReminderConfig::new(
        payload.enabled.unwrap_or(false),
        time,
        payload.timezone,
        channels,
    )
    .map_err(habit_validation_error)
}

fn parse_create(identity: Identity, body: CreateHabitBody) -> ApiResult<CreateHabitRequest> {
    let title = body
        .title
        .ok_or_else(|| missing_field_error(FieldName::new("title")))?;
    Ok(CreateHabitRequest {
        identity,
        title: HabitTitle::new(title).map_err(habit_validation_error)?,
        description: parse_description(body.description)?.unwrap_or_default(),
        frequency: parse_frequency(body.frequency)?.unwrap_or_default(),
        reminder: body
            .reminder
            .map(parse_reminder)
            .transpose()?
            .unwrap_or_default(),
    })
}

fn parse_changes(body: UpdateHabitBody) -> ApiResult<HabitChanges> {
    Ok(HabitChanges {
        title: body
            .title
            .map(|raw| HabitTitle::new(raw).map_err(habit_validation_error))
            .transpose()?,
        description: parse_description(body.description)?,
        frequency: parse_frequency(body.frequency)?,
    })
}

/// Create a habit for the caller.
#[utoipa::path(
    post,
    path = "/api/v1/habits",
    request_body = CreateHabitBody,
    responses(
        (status = 201, description = "Habit created", body = HabitResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "createHabit"
)]
#[post("/habits")]
pub async fn create_habit(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<CreateHabitBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create(caller.into_identity(), payload.into_inner())?;
    let habit = state.habits.create_habit(request).await?;
    Ok(HttpResponse::Created().json(HabitResponse::from(&habit)))
}

/// List the caller's habits, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/habits",
    responses(
        (status = 200, description = "Owned habits", body = HabitListResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "listHabits"
)]
#[get("/habits")]
pub async fn list_habits(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<HttpResponse> {
    let habits = state.habits_query.list_habits(caller.owner()).await?;
    let habits: Vec<HabitResponse> = habits.iter().map(HabitResponse::from).collect();
    Ok(HttpResponse::Ok()
        .insert_header(owner_private())
        .json(HabitListResponse {
            total: habits.len(),
            habits,
        }))
}

/// Fetch one owned habit.
#[utoipa::path(
    get,
    path = "/api/v1/habits/{id}",
    params(("id" = Uuid, Path, description = "Habit identifier")),
    responses(
        (status = 200, description = "Habit", body = HabitResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found or not owned", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "getHabit"
)]
#[get("/habits/{id}")]
pub async fn get_habit(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<HabitResponse>> {
    let habit_id = parse_uuid(&path, HABIT_ID)?;
    let habit = state
        .habits_query
        .get_habit(caller.owner(), habit_id)
        .await?;
    Ok(web::Json(HabitResponse::from(&habit)))
}

/// Update title, description, or frequency.
#[utoipa::path(
    put,
    path = "/api/v1/habits/{id}",
    params(("id" = Uuid, Path, description = "Habit identifier")),
    request_body = UpdateHabitBody,
    responses(
        (status = 200, description = "Updated habit", body = HabitResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found or not owned", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "updateHabit"
)]
#[put("/habits/{id}")]
pub async fn update_habit(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<UpdateHabitBody>,
) -> ApiResult<web::Json<HabitResponse>> {
    let habit_id = parse_uuid(&path, HABIT_ID)?;
    let changes = parse_changes(payload.into_inner())?;
    let habit = state
        .habits
        .update_habit(UpdateHabitRequest {
            owner: caller.owner().clone(),
            habit_id,
            changes,
        })
        .await?;
    Ok(web::Json(HabitResponse::from(&habit)))
}

/// Replace the reminder configuration.
#[utoipa::path(
    put,
    path = "/api/v1/habits/{id}/reminder",
    params(("id" = Uuid, Path, description = "Habit identifier")),
    request_body = ReminderPayload,
    responses(
        (status = 200, description = "Updated habit", body = HabitResponse),
        (status = 400, description = "Invalid reminder", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found or not owned", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "updateHabitReminder"
)]
#[put("/habits/{id}/reminder")]
pub async fn update_reminder(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<ReminderPayload>,
) -> ApiResult<web::Json<HabitResponse>> {
    let habit_id = parse_uuid(&path, HABIT_ID)?;
    let reminder = parse_reminder(payload.into_inner())?;
    let habit = state
        .habits
        .update_reminder(UpdateReminderRequest {
            owner: caller.owner().clone(),
            habit_id,
            reminder,
        })
        .await?;
    Ok(web::Json(HabitResponse::from(&habit)))
}

/// Delete an owned habit. Its check-ins and achievements are left in place.
#[utoipa::path(
    delete,
    path = "/api/v1/habits/{id}",
    params(("id" = Uuid, Path, description = "Habit identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found or not owned", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "deleteHabit"
)]
#[delete("/habits/{id}")]
pub async fn delete_habit(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let habit_id = parse_uuid(&path, HABIT_ID)?;
    state.habits.delete_habit(caller.owner(), habit_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "habits_tests.rs"]
mod tests;

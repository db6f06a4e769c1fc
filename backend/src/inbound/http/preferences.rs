//! User preference handlers.
//!
//! ```text
//! GET /api/v1/users/preferences
//! PUT /api/v1/users/preferences {"theme":"dark"}
//! ```

use actix_web::{HttpResponse, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Theme, UserPreferences};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::cache_control::owner_private;
use crate::inbound::http::schemas::{ErrorSchema, UserPreferencesSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, preferences_validation_error,
};

/// Request body for `PUT /api/v1/users/preferences`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdatePreferencesBody {
    /// `light` or `dark`.
    #[schema(example = "dark")]
    pub theme: Option<String>,
}

/// Envelope shared by both preference endpoints.
#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub preferences: UserPreferences,
}

/// Documentation shape of [`PreferencesResponse`].
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation")]
pub struct PreferencesResponseSchema {
    preferences: UserPreferencesSchema,
}

fn parse_theme(body: UpdatePreferencesBody) -> ApiResult<Theme> {
    body.theme
        .ok_or_else(|| missing_field_error(FieldName::new("theme")))?
        .parse::<Theme>()
        .map_err(preferences_validation_error)
}

/// Read the caller's preferences; `light` until something is saved.
#[utoipa::path(
    get,
    path = "/api/v1/users/preferences",
    responses(
        (status = 200, description = "Current preferences", body = PreferencesResponseSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["preferences"],
    operation_id = "getPreferences"
)]
#[get("/users/preferences")]
pub async fn get_preferences(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<HttpResponse> {
    let preferences = state.preferences_query.preferences(caller.owner()).await?;
    Ok(HttpResponse::Ok()
        .insert_header(owner_private())
        .json(PreferencesResponse { preferences }))
}

/// Save the caller's theme, creating the row on first use.
#[utoipa::path(
    put,
    path = "/api/v1/users/preferences",
    request_body = UpdatePreferencesBody,
    responses(
        (status = 200, description = "Saved preferences", body = PreferencesResponseSchema),
        (status = 400, description = "Missing or unknown theme", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["preferences"],
    operation_id = "updatePreferences"
)]
#[put("/users/preferences")]
pub async fn update_preferences(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<UpdatePreferencesBody>,
) -> ApiResult<HttpResponse> {
    let theme = parse_theme(payload.into_inner())?;
    let preferences = state
        .preferences
        .update_preferences(caller.owner(), theme)
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header(owner_private())
        .json(PreferencesResponse { preferences }))
}

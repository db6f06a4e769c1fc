//! Share link handlers.
//!
//! ```text
//! POST /api/v1/share {"imageUrl":"https://cdn.example/p.png","habitId":"…"}
//! GET  /share/{token}
//! ```
//!
//! The second route is public: it sits outside `/api/v1`, takes no bearer
//! token, and answers with an HTML page rather than JSON.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::CreateShareRequest;
use crate::domain::{Error, ErrorCode, OwnerId, ShareImage, SharedProgress};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::{ErrorSchema, ShareLinkSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_uuid, share_validation_error,
};

/// Request body for `POST /api/v1/share`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareBody {
    /// Snapshot to show: an http(s) URL or a `data:image/` URI.
    #[schema(example = "https://cdn.example/progress.png")]
    pub image_url: Option<String>,
    /// Habit the snapshot belongs to.
    pub habit_id: Option<String>,
}

fn parse_share(owner: OwnerId, body: CreateShareBody) -> ApiResult<CreateShareRequest> {
    let image = body
        .image_url
        .ok_or_else(|| missing_field_error(FieldName::new("imageUrl")))?;
    Ok(CreateShareRequest {
        owner,
        image: ShareImage::new(image).map_err(share_validation_error)?,
        habit_id: body
            .habit_id
            .as_deref()
            .map(|raw| parse_uuid(raw, FieldName::new("habitId")))
            .transpose()?,
    })
}

/// Escape `raw` for HTML text and double-quoted attributes.
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn html_page(title: &str, head: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n{head}</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

fn progress_page(shared: &SharedProgress) -> String {
    let image = escape_html(&shared.image_url);
    let head = format!(
        "<meta property=\"og:title\" content=\"Check out my habit progress!\">\n\
         <meta property=\"og:image\" content=\"{image}\">\n\
         <meta name=\"twitter:card\" content=\"summary_large_image\">\n"
    );
    let body = format!(
        "<main>\n<h1>Check out my habit progress!</h1>\n\
         <img src=\"{image}\" alt=\"Habit progress\">\n</main>\n"
    );
    html_page("Shared habit progress", &head, &body)
}

fn error_page(error: &Error) -> HttpResponse {
    let heading = match error.code() {
        ErrorCode::InvalidRequest => "This share link is invalid.",
        ErrorCode::NotFound => "This shared progress was not found or has expired.",
        _ => {
            warn!(error = %error, "shared progress lookup failed");
            "Shared progress could not be loaded. Please try again later."
        }
    };
    HttpResponse::build(error.status_code())
        .content_type(ContentType::html())
        .body(html_page(
            "Shared habit progress",
            "",
            &format!("<main>\n<h1>{heading}</h1>\n</main>\n"),
        ))
}

/// Issue a public link to a progress snapshot, valid for seven days.
#[utoipa::path(
    post,
    path = "/api/v1/share",
    request_body = CreateShareBody,
    responses(
        (status = 201, description = "Link issued", body = ShareLinkSchema),
        (status = 400, description = "Missing or unsupported image, malformed habit id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Habit not found", body = ErrorSchema)
    ),
    tags = ["share"],
    operation_id = "createShareLink"
)]
#[post("/share")]
pub async fn create_share(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<CreateShareBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_share(caller.owner().clone(), payload.into_inner())?;
    let link = state.shares.create_share(request).await?;
    Ok(HttpResponse::Created().json(link))
}

/// Public page showing a shared snapshot.
#[utoipa::path(
    get,
    path = "/share/{token}",
    params(("token" = String, Path, description = "Token from the share link")),
    responses(
        (status = 200, description = "HTML page with the snapshot", content_type = "text/html"),
        (status = 400, description = "Token does not verify", content_type = "text/html"),
        (status = 404, description = "Unknown or expired link", content_type = "text/html")
    ),
    security([]),
    tags = ["share"],
    operation_id = "viewSharedProgress"
)]
#[get("/share/{token}")]
pub async fn shared_progress_page(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> HttpResponse {
    let token = path.into_inner();
    match state.shares_query.shared_progress(&token).await {
        Ok(shared) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(progress_page(&shared)),
        Err(error) => error_page(&error),
    }
}

#[cfg(test)]
#[path = "share_tests.rs"]
mod tests;

//! Notification handlers.
//!
//! ```text
//! GET   /api/v1/notifications?read=false&page=1&limit=20
//! PUT   /api/v1/notifications/{id}/read
//! PUT   /api/v1/notifications/read-all
//! ```

use actix_web::{HttpResponse, get, put, web};
use pagination::{PageInfo, PageRequest, PageRequestError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Notification, NotificationFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::cache_control::owner_private;
use crate::inbound::http::schemas::{ErrorSchema, NotificationSchema, PageInfoSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Filter and paging parameters for the listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationListQuery {
    /// Only read (`true`) or unread (`false`) notifications.
    pub read: Option<bool>,
    /// One-based page number.
    pub page: Option<u32>,
    /// Page size, clamped to 100.
    pub limit: Option<u32>,
}

/// Paginated notification envelope.
#[derive(Debug, Serialize)]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    pub pagination: PageInfo,
}

/// Documentation shape of [`NotificationPage`].
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation")]
pub struct NotificationPageSchema {
    notifications: Vec<NotificationSchema>,
    pagination: PageInfoSchema,
}

/// Result of `PUT /notifications/read-all`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadResponse {
    pub modified_count: u64,
}

fn map_page_error(error: PageRequestError) -> Error {
    let field = match error {
        PageRequestError::InvalidPage => "page",
        PageRequestError::InvalidLimit => "limit",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field,
        "code": "invalid_pagination",
    }))
}

/// List the caller's notifications, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    params(NotificationListQuery),
    responses(
        (status = 200, description = "A page of notifications", body = NotificationPageSchema),
        (status = 400, description = "Invalid paging parameters", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    caller: Authenticated,
    query: web::Query<NotificationListQuery>,
) -> ApiResult<HttpResponse> {
    let NotificationListQuery { read, page, limit } = query.into_inner();
    let request = PageRequest::new(page, limit).map_err(map_page_error)?;
    let page = state
        .notifications_query
        .list_notifications(caller.owner(), NotificationFilter { read }, request)
        .await?;
    let (notifications, pagination) = page.into_parts();
    Ok(HttpResponse::Ok()
        .insert_header(owner_private())
        .json(NotificationPage {
            notifications,
            pagination,
        }))
}

/// Mark one owned notification as read.
#[utoipa::path(
    put,
    path = "/api/v1/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification identifier")),
    responses(
        (status = 200, description = "Updated notification", body = NotificationSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found or not owned", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationRead"
)]
#[put("/notifications/{id}/read")]
pub async fn mark_read(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_uuid(&path, FieldName::new("id"))?;
    let notification = state.notifications.mark_read(caller.owner(), id).await?;
    Ok(HttpResponse::Ok().json(notification))
}

/// Mark every unread notification of the caller as read.
#[utoipa::path(
    put,
    path = "/api/v1/notifications/read-all",
    responses(
        (status = 200, description = "Number of notifications changed", body = MarkAllReadResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "markAllNotificationsRead"
)]
#[put("/notifications/read-all")]
pub async fn mark_all_read(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<web::Json<MarkAllReadResponse>> {
    let modified_count = state.notifications.mark_all_read(caller.owner()).await?;
    Ok(web::Json(MarkAllReadResponse { modified_count }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::NotificationRepository;
    use crate::domain::{Frequency, Habit, HabitDescription, HabitDraft, HabitTitle, OwnerId};
    use crate::domain::{ReminderConfig, StreakState};
    use crate::inbound::http::test_utils::{backend, dev_bearer, now, send_json};
    use crate::test_support::MemoryBackend;
    use actix_web::test as actix_test;
    use chrono::TimeDelta;
    use rstest::rstest;
    use uuid::Uuid;

    fn habit_for(owner: &str) -> Habit {
        Habit::from(HabitDraft {
            id: Uuid::new_v4(),
            owner: OwnerId::new(owner).expect("owner"),
            owner_email: None,
            title: HabitTitle::new("Stretch").expect("title"),
            description: HabitDescription::default(),
            frequency: Frequency::Daily,
            streak: StreakState::empty(),
            reminder: ReminderConfig::default(),
            created_at: now(),
            updated_at: now(),
        })
    }

    async fn seed(backend: &MemoryBackend, owner: &str, count: i64) -> Vec<Uuid> {
        let habit = habit_for(owner);
        let mut ids = Vec::new();
        for minutes in 0..count {
            let note = Notification::reminder(
                Uuid::new_v4(),
                &habit,
                now() + TimeDelta::minutes(minutes),
            );
            ids.push(note.id);
            backend
                .notifications
                .create(&note)
                .await
                .expect("seed notification");
        }
        ids
    }

    #[rstest]
    #[case(Some(0), None, "page")]
    #[case(None, Some(0), "limit")]
    fn zero_paging_values_are_rejected(
        #[case] page: Option<u32>,
        #[case] limit: Option<u32>,
        #[case] field: &str,
    ) {
        let error = PageRequest::new(page, limit)
            .map_err(map_page_error)
            .expect_err("invalid paging");
        assert_eq!(error.details().expect("details")["field"], field);
    }

    #[actix_web::test]
    async fn listing_is_paginated_newest_first() {
        let backend = backend();
        let ids = seed(&backend, "user-1", 3).await;
        let state = backend.http_state();

        let (status, body) = send_json(
            &state,
            actix_test::TestRequest::get()
                .uri("/api/v1/notifications?page=1&limit=2")
                .insert_header(dev_bearer("user-1")),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["notifications"][0]["id"], ids[2].to_string());
        assert_eq!(body["notifications"][1]["id"], ids[1].to_string());
        assert_eq!(body["pagination"]["totalItems"], 3);
        assert_eq!(body["pagination"]["totalPages"], 2);
        assert_eq!(body["pagination"]["hasNextPage"], true);
        assert_eq!(body["pagination"]["hasPrevPage"], false);
    }

    #[actix_web::test]
    async fn read_all_then_filter_unread_is_empty() {
        let backend = backend();
        seed(&backend, "user-1", 2).await;
        let state = backend.http_state();

        let (status, body) = send_json(
            &state,
            actix_test::TestRequest::put()
                .uri("/api/v1/notifications/read-all")
                .insert_header(dev_bearer("user-1")),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body["modifiedCount"], 2);

        let (_, unread) = send_json(
            &state,
            actix_test::TestRequest::get()
                .uri("/api/v1/notifications?read=false")
                .insert_header(dev_bearer("user-1")),
        )
        .await;
        assert_eq!(unread["pagination"]["totalItems"], 0);
    }

    #[actix_web::test]
    async fn marking_someone_elses_notification_is_not_found() {
        let backend = backend();
        let ids = seed(&backend, "user-1", 1).await;
        let state = backend.http_state();

        let (status, body) = send_json(
            &state,
            actix_test::TestRequest::put()
                .uri(&format!("/api/v1/notifications/{}/read", ids[0]))
                .insert_header(dev_bearer("user-2")),
        )
        .await;
        assert_eq!(status, 404);
        assert_eq!(body["code"], "not_found");
    }
}

//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every `/api/v1` handler, the public share page, and the
//!   health probes
//! - **Schemas**: wrappers from [`crate::inbound::http::schemas`] that
//!   describe domain types without coupling them to utoipa
//! - **Security**: bearer token authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::habits::{
    CreateHabitBody, HabitListResponse, HabitResponse, ReminderPayload, ReminderResponse,
    UpdateHabitBody,
};
use crate::inbound::http::preferences::{PreferencesResponseSchema, UpdatePreferencesBody};
use crate::inbound::http::schemas::{
    AchievementSchema, CheckinSchema, CompletionDaySchema, DayActivitySchema, ErrorCodeSchema,
    ErrorSchema, HabitDetailSchema, MoodNoteSchema, NotificationSchema, OverviewSchema,
    OverviewSummarySchema, PageInfoSchema, ShareLinkSchema, StatsPeriodSchema,
    StreakSummarySchema, SuggestionSchema, UserPreferencesSchema,
};
use crate::inbound::http::share::CreateShareBody;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name under which the bearer scheme is registered.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "ID token from the identity provider, sent as `Authorization: Bearer <token>`.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Habitwise API",
        description = "Habit tracking with calendar-day streaks, achievements, mood notes, reminders, and shareable progress.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::habits::create_habit,
        crate::inbound::http::habits::list_habits,
        crate::inbound::http::habits::get_habit,
        crate::inbound::http::habits::update_habit,
        crate::inbound::http::habits::update_reminder,
        crate::inbound::http::habits::delete_habit,
        crate::inbound::http::checkins::record_checkin,
        crate::inbound::http::checkins::list_checkins,
        crate::inbound::http::checkins::today_checkin,
        crate::inbound::http::stats::overview,
        crate::inbound::http::stats::habit_detail,
        crate::inbound::http::achievements::list_achievements,
        crate::inbound::http::moods::record_mood,
        crate::inbound::http::moods::list_moods,
        crate::inbound::http::notifications::list_notifications,
        crate::inbound::http::notifications::mark_read,
        crate::inbound::http::notifications::mark_all_read,
        crate::inbound::http::suggestions::daily_suggestion,
        crate::inbound::http::preferences::get_preferences,
        crate::inbound::http::preferences::update_preferences,
        crate::inbound::http::share::create_share,
        crate::inbound::http::share::shared_progress_page,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CreateHabitBody,
        UpdateHabitBody,
        ReminderPayload,
        ReminderResponse,
        HabitResponse,
        HabitListResponse,
        CheckinSchema,
        StreakSummarySchema,
        AchievementSchema,
        MoodNoteSchema,
        NotificationSchema,
        PageInfoSchema,
        StatsPeriodSchema,
        DayActivitySchema,
        OverviewSummarySchema,
        OverviewSchema,
        CompletionDaySchema,
        HabitDetailSchema,
        SuggestionSchema,
        UpdatePreferencesBody,
        UserPreferencesSchema,
        PreferencesResponseSchema,
        CreateShareBody,
        ShareLinkSchema,
    )),
    tags(
        (name = "habits", description = "Create and manage habits and their reminders"),
        (name = "checkins", description = "Daily check-ins and the streak ledger"),
        (name = "stats", description = "Activity overview and per-habit completion"),
        (name = "achievements", description = "Badges awarded for streaks and milestones"),
        (name = "moods", description = "One mood note per calendar day"),
        (name = "notifications", description = "Reminder and achievement notifications"),
        (name = "suggestions", description = "Daily habit suggestion"),
        (name = "preferences", description = "Per-user display preferences"),
        (name = "share", description = "Public links to progress snapshots"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure and path coverage.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const CHECKIN_SCHEMA_NAME: &str = "crate.domain.Checkin";
    const NOTIFICATION_SCHEMA_NAME: &str = "crate.domain.Notification";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, "code")]
    #[case(ERROR_SCHEMA_NAME, "traceId")]
    #[case(CHECKIN_SCHEMA_NAME, "habitId")]
    #[case(CHECKIN_SCHEMA_NAME, "date")]
    #[case(NOTIFICATION_SCHEMA_NAME, "type")]
    #[case(NOTIFICATION_SCHEMA_NAME, "scheduledFor")]
    fn schemas_use_wire_field_names(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let registered = schemas.get(schema).expect("schema registered");

        assert_object_schema_has_field(registered, field);
    }

    #[rstest]
    #[case("/api/v1/habits")]
    #[case("/api/v1/habits/{id}/checkins/today")]
    #[case("/api/v1/stats/overview")]
    #[case("/api/v1/notifications/read-all")]
    #[case("/api/v1/suggestions/daily")]
    #[case("/api/v1/share")]
    #[case("/share/{token}")]
    #[case("/health/ready")]
    fn documents_paths(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    #[case("/api/v1/notifications/read-all")]
    #[case("/api/v1/notifications/{id}/read")]
    #[case("/api/v1/users/preferences")]
    fn read_markers_and_preferences_are_put_operations(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get(path).expect("path documented");
        assert!(item.put.is_some(), "{path} should be PUT");
        assert!(item.patch.is_none(), "{path} should not be PATCH");
    }

    #[test]
    fn share_page_needs_no_bearer_token() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/share/{token}").expect("path documented");
        let page = item.get.as_ref().expect("GET documented");
        let security = page.security.as_ref().expect("security override");
        for requirement in security {
            let value = serde_json::to_value(requirement).expect("serialise requirement");
            assert!(value.get(BEARER_SCHEME).is_none(), "share page should be public");
        }
    }

    #[test]
    fn registers_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}

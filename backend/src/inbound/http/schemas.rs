//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their corresponding
//! domain types but live in the inbound adapter layer where framework
//! concerns belong.

#![expect(
    dead_code,
    reason = "Schema structs are only read by utoipa while generating OpenAPI"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    /// Duplicate check-in or mood note; sent with status 400.
    #[schema(rename = "conflict")]
    Conflict,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "title is required")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field context, or the existing record for duplicate writes.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Checkin`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Checkin)]
#[schema(rename_all = "camelCase")]
pub struct CheckinSchema {
    id: uuid::Uuid,
    habit_id: uuid::Uuid,
    owner_id: String,
    #[schema(example = "2026-03-04")]
    date: String,
    completed: bool,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::StreakSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::StreakSummary)]
#[schema(rename_all = "camelCase")]
pub struct StreakSummarySchema {
    id: uuid::Uuid,
    title: String,
    streak_current: u32,
    streak_best: u32,
    #[schema(example = "2026-03-04")]
    last_checkin_date: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Achievement`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Achievement)]
#[schema(rename_all = "camelCase")]
pub struct AchievementSchema {
    id: uuid::Uuid,
    owner_id: String,
    #[schema(example = "Perfect Week")]
    name: String,
    description: String,
    #[schema(rename = "type")]
    #[schema(example = "perfect_week")]
    kind: String,
    #[schema(example = json!({"days": 7}))]
    criteria: serde_json::Value,
    badge_svg: String,
    #[schema(example = "2026-03-10")]
    awarded_on: String,
    habit_id: Option<uuid::Uuid>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::MoodNote`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MoodNote)]
#[schema(rename_all = "camelCase")]
pub struct MoodNoteSchema {
    id: uuid::Uuid,
    owner_id: String,
    #[schema(example = "2026-03-04")]
    date: String,
    #[schema(example = "🙂")]
    emoji: String,
    note: String,
    #[schema(example = "positive")]
    sentiment: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::Notification`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Notification)]
#[schema(rename_all = "camelCase")]
pub struct NotificationSchema {
    id: uuid::Uuid,
    owner_id: String,
    habit_id: uuid::Uuid,
    #[schema(rename = "type")]
    #[schema(example = "reminder")]
    kind: String,
    title: String,
    message: String,
    read: bool,
    #[schema(value_type = String, format = DateTime)]
    scheduled_for: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`pagination::PageInfo`].
#[derive(ToSchema)]
#[schema(as = pagination::PageInfo)]
#[schema(rename_all = "camelCase")]
pub struct PageInfoSchema {
    current_page: u32,
    total_pages: u32,
    total_items: u64,
    items_per_page: u32,
    has_next_page: bool,
    has_prev_page: bool,
}

/// OpenAPI schema for [`crate::domain::StatsPeriod`].
#[derive(ToSchema)]
#[schema(as = crate::domain::StatsPeriod)]
pub struct StatsPeriodSchema {
    #[schema(example = "2026-02-03")]
    from: String,
    #[schema(example = "2026-03-04")]
    to: String,
    #[schema(example = 30)]
    days: u32,
}

/// OpenAPI schema for [`crate::domain::DayActivity`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DayActivity)]
#[schema(rename_all = "camelCase")]
pub struct DayActivitySchema {
    date: String,
    checkins: u32,
    unique_habits: u32,
}

/// OpenAPI schema for [`crate::domain::OverviewSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::OverviewSummary)]
#[schema(rename_all = "camelCase")]
pub struct OverviewSummarySchema {
    total_habits: u32,
    total_streak_current: u64,
    max_streak_best: u32,
    #[schema(example = 3.5)]
    average_streak: f64,
    habits_with_active_streak: u32,
    #[schema(rename = "activeDaysLast30")]
    active_days_last_30: u32,
    average_checkins_per_day: f64,
    /// Percentage of possible habit-days completed in the window.
    global_completion_rate: u32,
    total_checkins: u32,
    best_day: Option<DayActivitySchema>,
}

/// OpenAPI schema for [`crate::domain::Overview`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Overview)]
pub struct OverviewSchema {
    summary: OverviewSummarySchema,
    period: StatsPeriodSchema,
    #[schema(rename = "last30Days")]
    last_30_days: Vec<DayActivitySchema>,
}

/// OpenAPI schema for [`crate::domain::CompletionDay`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CompletionDay)]
pub struct CompletionDaySchema {
    date: String,
    completed: bool,
}

/// OpenAPI schema for [`crate::domain::HabitDetail`].
#[derive(ToSchema)]
#[schema(as = crate::domain::HabitDetail)]
#[schema(rename_all = "camelCase")]
pub struct HabitDetailSchema {
    habit: StreakSummarySchema,
    /// Streak computed on read with a today-or-yesterday anchor.
    active_streak: u32,
    completion_rate: u32,
    completed_days: u32,
    period: StatsPeriodSchema,
    #[schema(rename = "last30Days")]
    last_30_days: Vec<CompletionDaySchema>,
}

/// OpenAPI schema for [`crate::domain::Suggestion`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Suggestion)]
pub struct SuggestionSchema {
    #[schema(example = "Take a ten minute walk after lunch")]
    title: String,
    reason: String,
}

/// OpenAPI schema for [`crate::domain::UserPreferences`].
#[derive(ToSchema)]
#[schema(as = crate::domain::UserPreferences)]
#[schema(rename_all = "camelCase")]
pub struct UserPreferencesSchema {
    owner_id: String,
    #[schema(example = "light")]
    theme: String,
    /// Absent until the owner first saves.
    #[schema(value_type = Option<String>, format = DateTime)]
    updated_at: Option<String>,
}

/// OpenAPI schema for [`crate::domain::ShareLink`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ShareLink)]
#[schema(rename_all = "camelCase")]
pub struct ShareLinkSchema {
    #[schema(example = "https://habitwise.example/share/eyJhbGciOiJIUzI1NiJ9.e30.sig")]
    share_url: String,
    token: String,
    #[schema(value_type = String, format = DateTime)]
    expires_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_schema_uses_camel_case_trace_id() {
        let schema_json = schema_to_json::<ErrorSchema>();
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("traceId"), "{schema_json}");
    }

    #[test]
    fn error_code_schema_variants_match_domain() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "forbidden",
            "not_found",
            "conflict",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn notification_schema_renames_kind_to_type() {
        let schema_json = schema_to_json::<NotificationSchema>();
        assert!(schema_json.contains("\"type\""));
        assert!(schema_json.contains("scheduledFor"));
    }

    #[test]
    fn overview_schema_uses_wire_names() {
        let schema_json = schema_to_json::<OverviewSummarySchema>();
        assert!(schema_json.contains("activeDaysLast30"));
        assert!(schema_json.contains("globalCompletionRate"));
    }
}

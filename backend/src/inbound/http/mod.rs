//! HTTP inbound adapter exposing REST endpoints.
//!
//! Routes registered by [`configure_api`] live under `/api/v1` and require
//! a bearer token. [`configure_public`] holds the unauthenticated pages
//! mounted at the root.

pub mod achievements;
pub mod auth;
pub mod cache_control;
pub mod checkins;
pub mod error;
pub mod habits;
pub mod health;
pub mod moods;
pub mod notifications;
pub mod preferences;
pub mod schemas;
pub mod share;
pub mod state;
pub mod stats;
pub mod suggestions;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// Literal paths are registered before `{id}` patterns that could shadow
/// them (`/notifications/read-all` before `/notifications/{id}/read`).
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(habits::create_habit)
        .service(habits::list_habits)
        .service(habits::get_habit)
        .service(habits::update_habit)
        .service(habits::update_reminder)
        .service(habits::delete_habit)
        .service(checkins::record_checkin)
        .service(checkins::today_checkin)
        .service(checkins::list_checkins)
        .service(stats::overview)
        .service(stats::habit_detail)
        .service(achievements::list_achievements)
        .service(moods::record_mood)
        .service(moods::list_moods)
        .service(notifications::list_notifications)
        .service(notifications::mark_all_read)
        .service(notifications::mark_read)
        .service(suggestions::daily_suggestion)
        .service(preferences::get_preferences)
        .service(preferences::update_preferences)
        .service(share::create_share);
}

/// Register the public, unauthenticated pages on `cfg`.
pub fn configure_public(cfg: &mut web::ServiceConfig) {
    cfg.service(share::shared_progress_page);
}

//! PostgreSQL persistence adapters built on Diesel.
//!
//! Repositories translate between row structs (`models.rs`) and domain
//! types; rows and the schema stay private to this module. Connections come
//! from a `bb8` pool driven by `diesel-async`, and every failure is mapped
//! onto the owning port's error enum.
//!
//! ```ignore
//! use habitwise::outbound::persistence::{DbPool, DieselHabitRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/habitwise")).await?;
//! let habits = DieselHabitRepository::new(pool);
//! ```

mod diesel_achievement_repository;
mod diesel_basic_error_mapping;
mod diesel_checkin_repository;
mod diesel_habit_repository;
mod diesel_mood_note_repository;
mod diesel_notification_repository;
mod diesel_shared_progress_repository;
mod diesel_user_preferences_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_achievement_repository::DieselAchievementRepository;
pub use diesel_checkin_repository::DieselCheckinRepository;
pub use diesel_habit_repository::DieselHabitRepository;
pub use diesel_mood_note_repository::DieselMoodNoteRepository;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_shared_progress_repository::DieselSharedProgressRepository;
pub use diesel_user_preferences_repository::DieselUserPreferencesRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

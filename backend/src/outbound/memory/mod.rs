//! Mutex-guarded in-memory adapters for every persistence port.
//!
//! Used when no database is configured and by integration tests. Uniqueness
//! constraints mirror the PostgreSQL schema so that duplicate handling
//! behaves identically.

use std::sync::{Mutex, MutexGuard};

mod achievements;
mod checkins;
mod habits;
mod mood_notes;
mod notifications;
mod preferences;
mod shares;

pub use achievements::InMemoryAchievementRepository;
pub use checkins::InMemoryCheckinRepository;
pub use habits::InMemoryHabitRepository;
pub use mood_notes::InMemoryMoodNoteRepository;
pub use notifications::InMemoryNotificationRepository;
pub use preferences::InMemoryUserPreferencesRepository;
pub use shares::InMemorySharedProgressRepository;

/// Lock `store`, turning poisoning into an error message for the port.
fn lock<'a, T>(store: &'a Mutex<T>, name: &str) -> Result<MutexGuard<'a, T>, String> {
    store
        .lock()
        .map_err(|_| format!("{name} store lock poisoned"))
}

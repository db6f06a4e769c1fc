//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Habits with their materialised streak fields and reminder settings.
    habits (id) {
        id -> Uuid,
        /// External identity subject.
        owner_id -> Varchar,
        owner_email -> Nullable<Varchar>,
        title -> Varchar,
        description -> Text,
        /// `daily`, `weekly` or `monthly`.
        frequency -> Varchar,
        streak_current -> Int4,
        streak_best -> Int4,
        last_checkin_date -> Nullable<Date>,
        reminder_enabled -> Bool,
        reminder_time -> Nullable<Time>,
        reminder_timezone -> Varchar,
        /// `email` and/or `in-app`.
        reminder_channels -> Array<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Check-in ledger, unique per `(habit_id, owner_id, day)`.
    checkins (id) {
        id -> Uuid,
        habit_id -> Uuid,
        owner_id -> Varchar,
        day -> Date,
        completed -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Awards; habit-scoped rows are unique per `(owner_id, kind, habit_id)`,
    /// global rows per `(owner_id, kind, name)`.
    achievements (id) {
        id -> Uuid,
        owner_id -> Varchar,
        name -> Varchar,
        description -> Text,
        kind -> Varchar,
        criteria -> Jsonb,
        badge_svg -> Text,
        awarded_on -> Date,
        habit_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Daily mood journal, unique per `(owner_id, day)`.
    mood_notes (id) {
        id -> Uuid,
        owner_id -> Varchar,
        day -> Date,
        emoji -> Varchar,
        note -> Text,
        sentiment -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    notifications (id) {
        id -> Uuid,
        owner_id -> Varchar,
        habit_id -> Uuid,
        kind -> Varchar,
        title -> Varchar,
        message -> Text,
        read -> Bool,
        scheduled_for -> Timestamptz,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per owner.
    user_preferences (owner_id) {
        owner_id -> Varchar,
        /// `light` or `dark`.
        theme -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Public progress snapshots keyed by their signed token.
    shared_progress (token) {
        token -> Text,
        owner_id -> Varchar,
        habit_id -> Nullable<Uuid>,
        image_url -> Text,
        shared_at -> Timestamptz,
        expires_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    habits,
    checkins,
    achievements,
    mood_notes,
    notifications,
    user_preferences,
    shared_progress,
);

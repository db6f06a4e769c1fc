//! Achievements and the rules that grant them.
//!
//! Rules are evaluated after each successful streak update. A rule yields an
//! [`AchievementGrant`] when its threshold is met; persistence decides
//! whether the grant is new or a duplicate of an earlier award.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use uuid::Uuid;

use super::calendar::CalendarDay;
use super::habit::Habit;
use super::user::OwnerId;

/// Unknown achievement kind label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown achievement kind: {0}")]
pub struct UnknownAchievementKind(pub String);

/// Category of an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    /// Streak-length milestone.
    Streak,
    /// Lifetime check-in count milestone.
    TotalCheckins,
    /// Seven consecutive days on one habit.
    PerfectWeek,
    /// Anything else.
    Custom,
}

impl AchievementKind {
    /// Storage and wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Streak => "streak",
            Self::TotalCheckins => "total_checkins",
            Self::PerfectWeek => "perfect_week",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for AchievementKind {
    type Err = UnknownAchievementKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "streak" => Ok(Self::Streak),
            "total_checkins" => Ok(Self::TotalCheckins),
            "perfect_week" => Ok(Self::PerfectWeek),
            "custom" => Ok(Self::Custom),
            other => Err(UnknownAchievementKind(other.to_owned())),
        }
    }
}

impl fmt::Display for AchievementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A durable, one-time award.
///
/// Habit-scoped awards are unique per `(owner, kind, habit_id)`; global
/// awards are unique per `(owner, kind, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: Uuid,
    #[serde(rename = "ownerId")]
    pub owner: OwnerId,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: AchievementKind,
    pub criteria: Value,
    pub badge_svg: String,
    #[serde(rename = "awardedOn")]
    pub awarded_on: CalendarDay,
    pub habit_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// An achievement a rule wants to award, before identifiers are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementGrant {
    pub kind: AchievementKind,
    pub name: String,
    pub description: String,
    pub criteria: Value,
    pub badge_svg: &'static str,
    pub habit_id: Option<Uuid>,
}

impl AchievementGrant {
    /// Materialise the grant for `owner` on `day`.
    #[must_use]
    pub fn into_achievement(
        self,
        id: Uuid,
        owner: OwnerId,
        day: CalendarDay,
        now: DateTime<Utc>,
    ) -> Achievement {
        Achievement {
            id,
            owner,
            name: self.name,
            description: self.description,
            kind: self.kind,
            criteria: self.criteria,
            badge_svg: self.badge_svg.to_owned(),
            awarded_on: day,
            habit_id: self.habit_id,
            created_at: now,
        }
    }
}

/// A streak-threshold rule scoped to one habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementRule {
    pub kind: AchievementKind,
    pub name: &'static str,
    pub threshold_days: u32,
    pub badge_svg: &'static str,
}

impl AchievementRule {
    /// Grant this rule's award when `habit`'s current streak reaches the
    /// threshold.
    #[must_use]
    pub fn evaluate(&self, habit: &Habit) -> Option<AchievementGrant> {
        if habit.streak().current() < self.threshold_days {
            return None;
        }
        Some(AchievementGrant {
            kind: self.kind,
            name: self.name.to_owned(),
            description: format!(
                "Completed the habit \"{}\" for {} consecutive days",
                habit.title(),
                self.threshold_days
            ),
            criteria: json!({ "days": self.threshold_days }),
            badge_svg: self.badge_svg,
            habit_id: Some(habit.id()),
        })
    }
}

const PERFECT_WEEK_BADGE: &str = concat!(
    r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64">"##,
    r##"<circle cx="32" cy="32" r="30" fill="#f5b301" stroke="#b37f00" stroke-width="4"/>"##,
    r##"<path d="M32 14l5.3 10.8 11.9 1.7-8.6 8.4 2 11.8L32 41.1l-10.6 5.6 2-11.8-8.6-8.4 11.9-1.7z" fill="#fff"/>"##,
    r##"<text x="32" y="58" font-size="8" text-anchor="middle" fill="#5a3f00">7</text>"##,
    "</svg>"
);

/// Seven consecutive days on one habit.
pub const PERFECT_WEEK: AchievementRule = AchievementRule {
    kind: AchievementKind::PerfectWeek,
    name: "Perfect Week",
    threshold_days: 7,
    badge_svg: PERFECT_WEEK_BADGE,
};

/// Rules evaluated after every check-in.
pub const RULES: &[AchievementRule] = &[PERFECT_WEEK];

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;
    use crate::domain::habit::{
        Frequency, HabitDescription, HabitDraft, HabitTitle, ReminderConfig,
    };
    use crate::domain::streak::StreakState;

    fn habit_with_streak(current: u32, best: u32) -> Habit {
        let now = Utc
            .with_ymd_and_hms(2026, 5, 1, 0, 0, 0)
            .single()
            .expect("instant");
        Habit::from(HabitDraft {
            id: Uuid::nil(),
            owner: OwnerId::new("owner").expect("owner"),
            owner_email: None,
            title: HabitTitle::new("Meditate").expect("title"),
            description: HabitDescription::default(),
            frequency: Frequency::Daily,
            streak: StreakState::new(current, best, None).expect("streak"),
            reminder: ReminderConfig::default(),
            created_at: now,
            updated_at: now,
        })
    }

    #[rstest]
    #[case(0, false)]
    #[case(6, false)]
    #[case(7, true)]
    #[case(12, true)]
    fn perfect_week_fires_at_seven(#[case] current: u32, #[case] fires: bool) {
        let habit = habit_with_streak(current, current.max(7));
        assert_eq!(PERFECT_WEEK.evaluate(&habit).is_some(), fires);
    }

    #[rstest]
    fn perfect_week_grant_describes_the_habit() {
        let grant = PERFECT_WEEK
            .evaluate(&habit_with_streak(7, 7))
            .expect("grant");
        assert_eq!(grant.kind, AchievementKind::PerfectWeek);
        assert_eq!(grant.name, "Perfect Week");
        assert_eq!(
            grant.description,
            "Completed the habit \"Meditate\" for 7 consecutive days"
        );
        assert_eq!(grant.criteria, json!({ "days": 7 }));
        assert!(grant.badge_svg.starts_with("<svg"));
        assert_eq!(grant.habit_id, Some(Uuid::nil()));
    }

    #[rstest]
    #[case("perfect_week", AchievementKind::PerfectWeek)]
    #[case("total_checkins", AchievementKind::TotalCheckins)]
    fn kind_parses_storage_labels(#[case] raw: &str, #[case] expected: AchievementKind) {
        assert_eq!(raw.parse::<AchievementKind>(), Ok(expected));
    }
}

//! Read-only rollups over habits and their check-in ledgers.
//!
//! Everything here is a pure derivation: callers load the habits and the
//! check-ins inside the window, then hand them over together with today's
//! calendar day.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;
use uuid::Uuid;

use super::calendar::{CalendarDay, DayRange};
use super::checkin::Checkin;
use super::habit::Habit;
use super::streak::current_streak_as_of;

/// Length of every reporting window, today included.
pub const WINDOW_DAYS: u32 = 30;

/// Inclusive reporting window ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsPeriod {
    pub from: CalendarDay,
    pub to: CalendarDay,
    pub days: u32,
}

impl StatsPeriod {
    /// The [`WINDOW_DAYS`]-day window whose last day is `today`.
    #[must_use]
    pub fn ending(today: CalendarDay) -> Self {
        let from = today
            .days_before(u64::from(WINDOW_DAYS - 1))
            .unwrap_or(today);
        Self {
            from,
            to: today,
            days: WINDOW_DAYS,
        }
    }

    /// Window as a day range for ledger queries.
    #[must_use]
    pub const fn range(&self) -> DayRange {
        DayRange::between(self.from, self.to)
    }

    /// Every day of the window, oldest first.
    #[must_use]
    pub fn each_day(&self) -> Vec<CalendarDay> {
        let mut days = Vec::with_capacity(self.days as usize);
        let mut cursor = Some(self.from);
        while let Some(day) = cursor.filter(|day| *day <= self.to) {
            days.push(day);
            cursor = day.days_after(1);
        }
        days
    }
}

/// Streak fields of one habit as shown next to check-ins and stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub id: Uuid,
    pub title: String,
    pub streak_current: u32,
    pub streak_best: u32,
    pub last_checkin_date: Option<CalendarDay>,
}

impl From<&Habit> for StreakSummary {
    fn from(habit: &Habit) -> Self {
        Self {
            id: habit.id(),
            title: habit.title().as_str().to_owned(),
            streak_current: habit.streak().current(),
            streak_best: habit.streak().best(),
            last_checkin_date: habit.streak().last_checkin(),
        }
    }
}

/// Check-in activity on one day across every habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayActivity {
    pub date: CalendarDay,
    pub checkins: u32,
    pub unique_habits: u32,
}

/// Headline numbers of the overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewSummary {
    pub total_habits: u32,
    pub total_streak_current: u64,
    pub max_streak_best: u32,
    pub average_streak: f64,
    pub habits_with_active_streak: u32,
    #[serde(rename = "activeDaysLast30")]
    pub active_days_last_30: u32,
    pub average_checkins_per_day: f64,
    pub global_completion_rate: u32,
    pub total_checkins: u32,
    pub best_day: Option<DayActivity>,
}

/// Cross-habit rollup for one owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub summary: OverviewSummary,
    pub period: StatsPeriod,
    #[serde(rename = "last30Days")]
    pub last_30_days: Vec<DayActivity>,
}

/// Completion flag for one day of one habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionDay {
    pub date: CalendarDay,
    pub completed: bool,
}

/// Per-habit rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDetail {
    pub habit: StreakSummary,
    pub active_streak: u32,
    pub completion_rate: u32,
    pub completed_days: u32,
    pub period: StatsPeriod,
    #[serde(rename = "last30Days")]
    pub last_30_days: Vec<CompletionDay>,
}

/// Round half away from zero to one decimal place.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Integer percentage of `part / whole`; zero when `whole` is zero.
fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let ratio = f64::from(part) / f64::from(whole);
    // Saturating float-to-int cast; the ratio is never negative.
    (ratio * 100.0).round() as u32
}

fn count_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Build the overview for `habits` from the check-ins inside the window.
///
/// Check-ins outside the window, or belonging to habits not in `habits`
/// (for example orphans of a deleted habit), are ignored.
#[must_use]
pub fn overview(habits: &[Habit], window_checkins: &[Checkin], today: CalendarDay) -> Overview {
    let period = StatsPeriod::ending(today);
    let range = period.range();
    let habit_ids: HashSet<Uuid> = habits.iter().map(Habit::id).collect();

    let mut per_day: BTreeMap<CalendarDay, (u32, BTreeSet<Uuid>)> = BTreeMap::new();
    for checkin in window_checkins
        .iter()
        .filter(|c| habit_ids.contains(&c.habit_id()) && range.contains(c.day()))
    {
        let entry = per_day.entry(checkin.day()).or_default();
        entry.0 += 1;
        entry.1.insert(checkin.habit_id());
    }

    let last_30_days: Vec<DayActivity> = period
        .each_day()
        .into_iter()
        .map(|date| {
            let (checkins, unique_habits) = per_day
                .get(&date)
                .map_or((0, 0), |(count, habits)| (*count, count_u32(habits.len())));
            DayActivity {
                date,
                checkins,
                unique_habits,
            }
        })
        .collect();

    let total_habits = count_u32(habits.len());
    let total_streak_current: u64 = habits
        .iter()
        .map(|h| u64::from(h.streak().current()))
        .sum();
    let max_streak_best = habits
        .iter()
        .map(|h| h.streak().best())
        .max()
        .unwrap_or(0);
    let habits_with_active_streak = count_u32(
        habits
            .iter()
            .filter(|h| h.streak().current() > 0)
            .count(),
    );
    let average_streak = if total_habits == 0 {
        0.0
    } else {
        // Streak sums stay far below 2^53, so the conversion is exact.
        round_to_tenth(total_streak_current as f64 / f64::from(total_habits))
    };

    let total_checkins: u32 = last_30_days.iter().map(|d| d.checkins).sum();
    let active_days_last_30 = count_u32(last_30_days.iter().filter(|d| d.checkins > 0).count());
    let average_checkins_per_day =
        round_to_tenth(f64::from(total_checkins) / f64::from(WINDOW_DAYS));
    let global_completion_rate =
        percentage(total_checkins, total_habits.saturating_mul(WINDOW_DAYS));

    // Earliest day wins ties.
    let best_day = last_30_days
        .iter()
        .fold(None::<DayActivity>, |best, day| match best {
            Some(current) if current.checkins >= day.checkins => Some(current),
            _ if day.checkins > 0 => Some(*day),
            other => other,
        });

    Overview {
        summary: OverviewSummary {
            total_habits,
            total_streak_current,
            max_streak_best,
            average_streak,
            habits_with_active_streak,
            active_days_last_30,
            average_checkins_per_day,
            global_completion_rate,
            total_checkins,
            best_day,
        },
        period,
        last_30_days,
    }
}

/// Build the per-habit rollup.
///
/// `ledger` holds every check-in day of the habit, newest first; it feeds
/// both the window series and the read-path active streak.
#[must_use]
pub fn habit_detail(habit: &Habit, ledger: &[CalendarDay], today: CalendarDay) -> HabitDetail {
    let period = StatsPeriod::ending(today);
    let range = period.range();
    let completed: BTreeSet<CalendarDay> = ledger
        .iter()
        .copied()
        .filter(|day| range.contains(*day))
        .collect();
    let completed_days = count_u32(completed.len());
    let last_30_days = period
        .each_day()
        .into_iter()
        .map(|date| CompletionDay {
            date,
            completed: completed.contains(&date),
        })
        .collect();

    HabitDetail {
        habit: StreakSummary::from(habit),
        active_streak: current_streak_as_of(ledger, today),
        completion_rate: percentage(completed_days, WINDOW_DAYS),
        completed_days,
        period,
        last_30_days,
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;

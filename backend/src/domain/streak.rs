//! Streak derivation over a habit's check-in ledger.
//!
//! Two entry points share one run-length walk:
//!
//! - [`advance_streak`] is the write path. It runs right after a check-in is
//!   recorded and anchors the walk at that check-in's day.
//! - [`current_streak_as_of`] is the read path. It anchors at today when
//!   today is checked in and at yesterday otherwise, so a streak stays alive
//!   until a full day is missed.
//!
//! Neither looks for the longest run anywhere in history. The best streak is
//! only ever raised by the write path.

use thiserror::Error;

use super::calendar::CalendarDay;

/// Invariant violations for persisted streak values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreakError {
    /// `current` exceeded `best`.
    #[error("current streak {current} exceeds best streak {best}")]
    CurrentExceedsBest {
        /// Offending current value.
        current: u32,
        /// Offending best value.
        best: u32,
    },
}

/// Materialised streak fields of one habit.
///
/// ## Invariants
/// - `current <= best`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakState {
    current: u32,
    best: u32,
    last_checkin: Option<CalendarDay>,
}

impl StreakState {
    /// Streak of a habit that has never been checked in.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            current: 0,
            best: 0,
            last_checkin: None,
        }
    }

    /// Restore persisted values.
    ///
    /// # Errors
    ///
    /// Returns [`StreakError::CurrentExceedsBest`] when the invariant does
    /// not hold.
    pub fn new(
        current: u32,
        best: u32,
        last_checkin: Option<CalendarDay>,
    ) -> Result<Self, StreakError> {
        if current > best {
            return Err(StreakError::CurrentExceedsBest { current, best });
        }
        Ok(Self {
            current,
            best,
            last_checkin,
        })
    }

    /// Length of the run ending at the last recorded check-in.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Longest run ever recorded.
    #[must_use]
    pub const fn best(&self) -> u32 {
        self.best
    }

    /// Day of the last recorded check-in.
    #[must_use]
    pub const fn last_checkin(&self) -> Option<CalendarDay> {
        self.last_checkin
    }
}

/// Count consecutive days ending at `anchor`.
///
/// `ledger` must be sorted newest first. Days after the anchor are skipped;
/// the walk stops at the first day that breaks the run.
fn run_length_from(ledger: &[CalendarDay], anchor: CalendarDay) -> u32 {
    let mut cursor = Some(anchor);
    let mut length = 0_u32;
    for &day in ledger {
        let Some(expected) = cursor else { break };
        if day > expected {
            continue;
        }
        if day != expected {
            break;
        }
        length = length.saturating_add(1);
        cursor = expected.previous();
    }
    length
}

/// Recompute streak fields after a check-in on `checkin_day`.
///
/// `ledger` holds every check-in day of the habit, newest first, including
/// the one just recorded. An empty ledger yields a streak of one.
///
/// # Examples
/// ```
/// use habitwise::domain::{CalendarDay, StreakState, advance_streak};
///
/// let day = |d| CalendarDay::from_ymd(2026, 1, d).expect("valid day");
/// let ledger = [day(3), day(2), day(1)];
/// let streak = advance_streak(&StreakState::empty(), &ledger, day(3));
/// assert_eq!((streak.current(), streak.best()), (3, 3));
/// ```
#[must_use]
pub fn advance_streak(
    previous: &StreakState,
    ledger: &[CalendarDay],
    checkin_day: CalendarDay,
) -> StreakState {
    let current = if ledger.is_empty() {
        1
    } else {
        run_length_from(ledger, checkin_day)
    };
    StreakState {
        current,
        best: previous.best.max(current),
        last_checkin: Some(checkin_day),
    }
}

/// Streak length for display on `today` without a fresh check-in.
///
/// # Examples
/// ```
/// use habitwise::domain::{CalendarDay, current_streak_as_of};
///
/// let day = |d| CalendarDay::from_ymd(2026, 1, d).expect("valid day");
/// // Yesterday and the day before are checked in; today is not yet.
/// assert_eq!(current_streak_as_of(&[day(9), day(8)], day(10)), 2);
/// assert_eq!(current_streak_as_of(&[day(8)], day(10)), 0);
/// ```
#[must_use]
pub fn current_streak_as_of(ledger: &[CalendarDay], today: CalendarDay) -> u32 {
    if ledger.is_empty() {
        return 0;
    }
    let anchor = if ledger.contains(&today) {
        Some(today)
    } else {
        today.previous()
    };
    anchor.map_or(0, |day| run_length_from(ledger, day))
}

#[cfg(test)]
mod tests {
    //! Streak walk properties.

    use super::*;
    use rstest::{fixture, rstest};

    fn day(offset: u64) -> CalendarDay {
        CalendarDay::from_ymd(2026, 3, 1)
            .and_then(|base| base.days_after(offset))
            .expect("fixture day")
    }

    fn ledger(days: &[u64]) -> Vec<CalendarDay> {
        let mut out: Vec<CalendarDay> = days.iter().map(|&d| day(d)).collect();
        out.sort_unstable_by(|a, b| b.cmp(a));
        out
    }

    /// Replay check-ins in order through the write path.
    fn replay(days: &[u64]) -> Vec<StreakState> {
        let mut state = StreakState::empty();
        let mut seen = Vec::new();
        let mut history = Vec::new();
        for &d in days {
            seen.push(d);
            state = advance_streak(&state, &ledger(&seen), day(d));
            history.push(state);
        }
        history
    }

    #[fixture]
    fn empty() -> StreakState {
        StreakState::empty()
    }

    #[rstest]
    fn first_checkin_starts_at_one(empty: StreakState) {
        let state = advance_streak(&empty, &ledger(&[0]), day(0));
        assert_eq!((state.current(), state.best()), (1, 1));
        assert_eq!(state.last_checkin(), Some(day(0)));
    }

    #[rstest]
    fn empty_ledger_counts_as_first_checkin(empty: StreakState) {
        let state = advance_streak(&empty, &[], day(4));
        assert_eq!((state.current(), state.best()), (1, 1));
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(7)]
    #[case(31)]
    fn consecutive_days_count_up(#[case] n: u64) {
        let days: Vec<u64> = (0..n).collect();
        let last = replay(&days).pop().expect("at least one state");
        assert_eq!(u64::from(last.current()), n);
        assert_eq!(u64::from(last.best()), n);
    }

    #[rstest]
    fn gap_resets_current_but_keeps_best() {
        let history = replay(&[0, 1, 2, 4]);
        let last = history.last().expect("state");
        assert_eq!(last.current(), 1);
        assert_eq!(last.best(), 3);
    }

    #[rstest]
    fn second_run_counts_only_the_latest_run() {
        let last = *replay(&[0, 1, 2, 4, 5]).last().expect("state");
        assert_eq!((last.current(), last.best()), (2, 3));
    }

    #[rstest]
    fn best_never_decreases() {
        let history = replay(&[0, 1, 2, 3, 5, 7, 8, 9, 10, 11, 13]);
        for pair in history.windows(2) {
            if let [before, after] = pair {
                assert!(after.best() >= before.best());
                assert!(after.current() <= after.best());
            }
        }
    }

    #[rstest]
    fn earlier_gaps_do_not_touch_best() {
        let previous = StreakState::new(2, 9, Some(day(10))).expect("valid state");
        let state = advance_streak(&previous, &ledger(&[11, 10, 3]), day(11));
        assert_eq!((state.current(), state.best()), (2, 9));
    }

    #[rstest]
    fn days_after_the_anchor_are_ignored() {
        let state = advance_streak(&StreakState::empty(), &ledger(&[6, 4, 3]), day(4));
        assert_eq!(state.current(), 2);
    }

    #[rstest]
    #[case(&[10, 9, 8], 10, 3)]
    #[case(&[9, 8], 10, 2)]
    #[case(&[8, 7], 10, 0)]
    #[case(&[10, 8], 10, 1)]
    #[case(&[], 10, 0)]
    fn read_path_anchors_at_today_or_yesterday(
        #[case] days: &[u64],
        #[case] today: u64,
        #[case] expected: u32,
    ) {
        assert_eq!(current_streak_as_of(&ledger(days), day(today)), expected);
    }

    #[rstest]
    fn restore_rejects_current_above_best() {
        assert_eq!(
            StreakState::new(4, 3, None),
            Err(StreakError::CurrentExceedsBest { current: 4, best: 3 })
        );
    }
}

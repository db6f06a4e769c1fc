//! Calendar-day normalisation.
//!
//! Every comparison between days goes through [`DayBoundary`], which
//! truncates instants to the start of their calendar day in one fixed
//! reference frame. Two instants describe the same day iff their
//! [`CalendarDay`] values are equal.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DAY_FORMAT: &str = "%Y-%m-%d";
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Validation failures for calendar input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// Text is not a `YYYY-MM-DD` date.
    #[error("invalid calendar day: {value}")]
    InvalidDay {
        /// Rejected input.
        value: String,
    },
    /// Text is not an RFC 3339 instant.
    #[error("invalid timestamp: {value}")]
    InvalidInstant {
        /// Rejected input.
        value: String,
    },
    /// Offset outside the ±14h range.
    #[error("day offset must be within ±840 minutes, got {minutes}")]
    InvalidOffset {
        /// Rejected offset.
        minutes: i32,
    },
}

/// A date without time, the unit of comparison for streaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    /// Wrap a date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a day from its components, returning `None` for impossible dates.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Underlying date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// The day before, or `None` at the start of the representable range.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.days_before(1)
    }

    /// The day `n` days earlier.
    #[must_use]
    pub fn days_before(self, n: u64) -> Option<Self> {
        self.0.checked_sub_days(Days::new(n)).map(Self)
    }

    /// The day `n` days later.
    #[must_use]
    pub fn days_after(self, n: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(n)).map(Self)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl FromStr for CalendarDay {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DAY_FORMAT)
            .map(Self)
            .map_err(|_| CalendarError::InvalidDay {
                value: s.to_owned(),
            })
    }
}

impl TryFrom<String> for CalendarDay {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarDay> for String {
    fn from(value: CalendarDay) -> Self {
        value.to_string()
    }
}

/// Inclusive day range; a missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayRange {
    /// Earliest included day.
    pub from: Option<CalendarDay>,
    /// Latest included day.
    pub to: Option<CalendarDay>,
}

impl DayRange {
    /// Range with no bounds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    /// Range covering `from..=to`.
    #[must_use]
    pub const fn between(from: CalendarDay, to: CalendarDay) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Whether `day` falls inside the range.
    #[must_use]
    pub fn contains(&self, day: CalendarDay) -> bool {
        self.from.is_none_or(|from| day >= from) && self.to.is_none_or(|to| day <= to)
    }
}

/// Reference frame used to truncate instants to calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundary {
    offset: FixedOffset,
}

impl Default for DayBoundary {
    fn default() -> Self {
        Self::utc()
    }
}

impl DayBoundary {
    /// Days start at midnight UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Days start at midnight in a fixed offset east of UTC.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidOffset`] outside ±14 hours.
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, CalendarError> {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(CalendarError::InvalidOffset { minutes });
        }
        FixedOffset::east_opt(minutes * 60)
            .map(|offset| Self { offset })
            .ok_or(CalendarError::InvalidOffset { minutes })
    }

    /// Calendar day containing `instant`.
    #[must_use]
    pub fn day_of(&self, instant: DateTime<Utc>) -> CalendarDay {
        CalendarDay(instant.with_timezone(&self.offset).date_naive())
    }

    /// Wall-clock time of `instant` in this frame.
    #[must_use]
    pub fn time_of(&self, instant: DateTime<Utc>) -> NaiveTime {
        instant.with_timezone(&self.offset).time()
    }

    /// First instant of `day`.
    #[must_use]
    pub fn start_of(&self, day: CalendarDay) -> DateTime<Utc> {
        let local = day.0.and_time(NaiveTime::MIN);
        (local - self.offset).and_utc()
    }

    /// Today according to `clock`.
    #[must_use]
    pub fn today(&self, clock: &dyn Clock) -> CalendarDay {
        self.day_of(clock.utc())
    }

    /// Normalise an RFC 3339 timestamp to its calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidInstant`] for malformed input.
    pub fn normalize(&self, raw: &str) -> Result<CalendarDay, CalendarError> {
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|instant| self.day_of(instant.with_timezone(&Utc)))
            .map_err(|_| CalendarError::InvalidInstant {
                value: raw.to_owned(),
            })
    }
}

/// Injected clock paired with the reference frame that defines "today".
#[derive(Clone)]
pub struct DayClock {
    clock: Arc<dyn Clock>,
    boundary: DayBoundary,
}

impl DayClock {
    /// Pair `clock` with `boundary`.
    pub fn new(clock: Arc<dyn Clock>, boundary: DayBoundary) -> Self {
        Self { clock, boundary }
    }

    /// Current instant.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Current calendar day.
    #[must_use]
    pub fn today(&self) -> CalendarDay {
        self.boundary.today(self.clock.as_ref())
    }

    /// Reference frame.
    #[must_use]
    pub const fn boundary(&self) -> DayBoundary {
        self.boundary
    }
}

impl fmt::Debug for DayClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DayClock")
            .field("boundary", &self.boundary)
            .finish_non_exhaustive()
    }
}

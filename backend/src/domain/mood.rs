//! Daily mood notes and their lexicon sentiment.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::calendar::{CalendarDay, DayRange};
use super::user::OwnerId;

/// Maximum emoji length in characters.
pub const MAX_EMOJI_LEN: usize = 16;
/// Maximum note length in characters.
pub const MAX_NOTE_LEN: usize = 200;

/// Validation errors for mood input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoodValidationError {
    #[error("emoji is required")]
    EmptyEmoji,
    #[error("emoji must be at most {max} characters")]
    EmojiTooLong { max: usize },
    #[error("note must be at most {max} characters")]
    NoteTooLong { max: usize },
    #[error("range must be one of today, last7days, last30days, all; got {value}")]
    UnknownRange { value: String },
}

/// Sentiment label derived from a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    /// Parse a storage label, treating unknown labels as neutral.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            _ => Self::Neutral,
        }
    }
}

const LEXICON: &[(&str, i32)] = &[
    ("amazing", 3),
    ("awesome", 3),
    ("excellent", 3),
    ("fantastic", 3),
    ("great", 2),
    ("happy", 2),
    ("joy", 2),
    ("love", 2),
    ("proud", 2),
    ("calm", 1),
    ("energized", 2),
    ("motivated", 2),
    ("good", 1),
    ("nice", 1),
    ("relaxed", 1),
    ("rested", 1),
    ("productive", 2),
    ("grateful", 2),
    ("bad", -2),
    ("sad", -2),
    ("angry", -3),
    ("awful", -3),
    ("terrible", -3),
    ("horrible", -3),
    ("tired", -1),
    ("exhausted", -2),
    ("stressed", -2),
    ("anxious", -2),
    ("bored", -1),
    ("lonely", -2),
    ("sick", -2),
    ("worried", -2),
    ("frustrated", -2),
    ("hate", -3),
];

/// Sum of lexicon weights over the words of `text`.
///
/// Words are compared case-insensitively after stripping non-alphabetic
/// characters.
#[must_use]
pub fn sentiment_score(text: &str) -> i32 {
    text.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphabetic())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter_map(|word| {
            LEXICON
                .iter()
                .find(|(entry, _)| *entry == word)
                .map(|(_, weight)| *weight)
        })
        .sum()
}

/// Classify `text`: above 1 is positive, below -1 negative.
#[must_use]
pub fn classify(text: &str) -> Sentiment {
    match sentiment_score(text) {
        score if score > 1 => Sentiment::Positive,
        score if score < -1 => Sentiment::Negative,
        _ => Sentiment::Neutral,
    }
}

/// Trimmed, non-blank emoji.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodEmoji(String);

impl MoodEmoji {
    /// Validate an emoji.
    ///
    /// # Errors
    ///
    /// Returns [`MoodValidationError`] when blank or oversized.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, MoodValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MoodValidationError::EmptyEmoji);
        }
        if trimmed.chars().count() > MAX_EMOJI_LEN {
            return Err(MoodValidationError::EmojiTooLong { max: MAX_EMOJI_LEN });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the emoji.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trimmed note text, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoodText(String);

impl MoodText {
    /// Validate a note.
    ///
    /// # Errors
    ///
    /// Returns [`MoodValidationError::NoteTooLong`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, MoodValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.chars().count() > MAX_NOTE_LEN {
            return Err(MoodValidationError::NoteTooLong { max: MAX_NOTE_LEN });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One mood entry; at most one per owner per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodNote {
    pub id: Uuid,
    #[serde(rename = "ownerId")]
    pub owner: OwnerId,
    #[serde(rename = "date")]
    pub day: CalendarDay,
    pub emoji: String,
    pub note: String,
    pub sentiment: Sentiment,
    pub created_at: DateTime<Utc>,
}

impl MoodNote {
    /// Build a note, deriving its sentiment from the text.
    #[must_use]
    pub fn record(
        id: Uuid,
        owner: OwnerId,
        day: CalendarDay,
        emoji: MoodEmoji,
        note: MoodText,
        now: DateTime<Utc>,
    ) -> Self {
        let sentiment = classify(note.as_str());
        Self {
            id,
            owner,
            day,
            emoji: emoji.0,
            note: note.0,
            sentiment,
            created_at: now,
        }
    }
}

/// Listing window for mood notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodRange {
    Today,
    #[serde(rename = "last7days")]
    Last7Days,
    #[default]
    #[serde(rename = "last30days")]
    Last30Days,
    All,
}

impl MoodRange {
    /// Wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Last7Days => "last7days",
            Self::Last30Days => "last30days",
            Self::All => "all",
        }
    }

    /// Day range covered when the listing runs on `today`.
    #[must_use]
    pub fn days(self, today: CalendarDay) -> DayRange {
        let back = match self {
            Self::Today => 0,
            Self::Last7Days => 6,
            Self::Last30Days => 29,
            Self::All => return DayRange::unbounded(),
        };
        DayRange::between(today.days_before(back).unwrap_or(today), today)
    }
}

impl FromStr for MoodRange {
    type Err = MoodValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(Self::Today),
            "last7days" => Ok(Self::Last7Days),
            "last30days" => Ok(Self::Last30Days),
            "all" => Ok(Self::All),
            other => Err(MoodValidationError::UnknownRange {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for MoodRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Daily habit suggestions.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::calendar::CalendarDay;
use super::user::OwnerId;

/// A suggested habit with a short motivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub reason: String,
}

impl Suggestion {
    /// Build a suggestion from borrowed text.
    #[must_use]
    pub fn new(title: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            reason: reason.into(),
        }
    }

    /// Returned whenever no source can produce a suggestion.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(
            "Drink a glass of water when you wake up",
            "Hydrating first thing supports your metabolism and energy.",
        )
    }

    /// Whether both fields carry text.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.reason.trim().is_empty()
    }
}

/// Stable digest of `(owner, day)` used for catalogue selection and cache
/// keys.
#[must_use]
pub fn suggestion_digest(owner: &OwnerId, day: CalendarDay) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(owner.as_str().as_bytes());
    hasher.update(b":");
    hasher.update(day.to_string().as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn digest_depends_on_owner_and_day() {
        let owner = OwnerId::new("owner").expect("owner");
        let other = OwnerId::new("other").expect("owner");
        let day = CalendarDay::from_ymd(2026, 1, 1).expect("day");
        let next = CalendarDay::from_ymd(2026, 1, 2).expect("day");
        assert_eq!(suggestion_digest(&owner, day), suggestion_digest(&owner, day));
        assert_ne!(suggestion_digest(&owner, day), suggestion_digest(&other, day));
        assert_ne!(suggestion_digest(&owner, day), suggestion_digest(&owner, next));
    }

    #[rstest]
    #[case("", "why", false)]
    #[case("what", "  ", false)]
    #[case("what", "why", true)]
    fn completeness_requires_both_fields(
        #[case] title: &str,
        #[case] reason: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(Suggestion::new(title, reason).is_complete(), expected);
    }

    #[rstest]
    fn fallback_is_complete() {
        assert!(Suggestion::fallback().is_complete());
    }
}

//! Built-in suggestion catalogue.

use async_trait::async_trait;

use crate::domain::ports::{SuggestionSource, SuggestionSourceError};
use crate::domain::{CalendarDay, OwnerId, Suggestion, suggestion_digest};

const CATALOGUE: &[(&str, &str)] = &[
    (
        "Take a ten minute walk outside",
        "Light exercise and fresh air lift your mood and energy.",
    ),
    (
        "Spend five minutes on mindful breathing",
        "Slow breathing lowers stress and sharpens focus.",
    ),
    (
        "Write down three things you are grateful for",
        "Gratitude journaling builds a more positive outlook.",
    ),
    (
        "Read ten pages of a book",
        "A little reading every day adds up to many books a year.",
    ),
    (
        "Put your phone away an hour before bed",
        "Less screen time in the evening improves sleep quality.",
    ),
    (
        "Eat one extra portion of vegetables",
        "Small diet changes are easier to keep than big ones.",
    ),
    (
        "Stretch for five minutes after waking up",
        "Gentle stretching eases stiffness and wakes the body up.",
    ),
];

/// Deterministic source: the same owner gets the same entry all day.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogueSuggestionSource;

impl CatalogueSuggestionSource {
    /// Catalogue source.
    pub const fn new() -> Self {
        Self
    }

    fn pick(owner: &OwnerId, day: CalendarDay) -> Suggestion {
        let digest = suggestion_digest(owner, day);
        let [a, b, c, d, ..] = digest;
        let slot = usize::try_from(u32::from_be_bytes([a, b, c, d])).unwrap_or(0);
        CATALOGUE
            .get(slot % CATALOGUE.len())
            .map_or_else(Suggestion::fallback, |(title, reason)| {
                Suggestion::new(*title, *reason)
            })
    }
}

#[async_trait]
impl SuggestionSource for CatalogueSuggestionSource {
    async fn suggest(
        &self,
        owner: &OwnerId,
        day: CalendarDay,
    ) -> Result<Suggestion, SuggestionSourceError> {
        Ok(Self::pick(owner, day))
    }
}

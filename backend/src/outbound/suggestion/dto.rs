//! Wire types for the suggestion service.

use serde::{Deserialize, Serialize};

use crate::domain::Suggestion;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SuggestionRequestDto<'a> {
    pub owner_id: &'a str,
    pub date: String,
    pub locale: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct SuggestionResponseDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl SuggestionResponseDto {
    /// Domain suggestion, or `None` when a field is missing or blank.
    pub fn into_domain(self) -> Option<Suggestion> {
        let suggestion = Suggestion::new(self.title?.trim(), self.reason?.trim());
        suggestion.is_complete().then_some(suggestion)
    }
}

//! Optional cache capability for daily suggestions.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Suggestion;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by the caching adapter.
    pub enum SuggestionCacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "suggestion cache backend failure: {message}",
        /// Serialisation or deserialisation of cached content failed.
        Serialization { message: String } =>
            "suggestion cache serialisation failed: {message}",
    }
}

/// Cache key for one owner's suggestion on one day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuggestionCacheKey(String);

/// Validation errors returned when constructing [`SuggestionCacheKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestionCacheKeyError {
    /// Key is empty after trimming whitespace.
    #[error("suggestion cache key must not be empty")]
    Empty,
    /// Key contains whitespace.
    #[error("suggestion cache key must not contain whitespace")]
    ContainsWhitespace,
}

impl SuggestionCacheKey {
    /// Validate a raw key.
    pub fn new(value: impl Into<String>) -> Result<Self, SuggestionCacheKeyError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(SuggestionCacheKeyError::Empty);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(SuggestionCacheKeyError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Borrow the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SuggestionCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-through cache for suggestions.
///
/// Callers treat every error as a miss.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionCache: Send + Sync {
    /// Read a cached suggestion.
    async fn get(
        &self,
        key: &SuggestionCacheKey,
    ) -> Result<Option<Suggestion>, SuggestionCacheError>;

    /// Store a suggestion.
    async fn put(
        &self,
        key: &SuggestionCacheKey,
        suggestion: &Suggestion,
    ) -> Result<(), SuggestionCacheError>;
}

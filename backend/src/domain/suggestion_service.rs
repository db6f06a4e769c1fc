//! Daily suggestion service.
//!
//! Reads through the optional [`SuggestionCache`]. A missing or failing
//! cache degrades to recomputing on every request; a failing source
//! degrades to [`Suggestion::fallback`], which is never cached.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    SuggestionCache, SuggestionCacheKey, SuggestionCacheKeyError, SuggestionQuery,
    SuggestionSource,
};
use crate::domain::suggestion::suggestion_digest;
use crate::domain::{CalendarDay, DayClock, Error, OwnerId, Suggestion};

const CACHE_NAMESPACE: &str = "suggestion:v1";

/// Cache key for `owner` on `day`: `suggestion:v1:<sha256 hex>`.
pub fn suggestion_cache_key(
    owner: &OwnerId,
    day: CalendarDay,
) -> Result<SuggestionCacheKey, SuggestionCacheKeyError> {
    let digest = suggestion_digest(owner, day);
    SuggestionCacheKey::new(format!("{CACHE_NAMESPACE}:{}", hex::encode(digest)))
}

/// Suggestion service implementing [`SuggestionQuery`].
pub struct SuggestionService {
    source: Arc<dyn SuggestionSource>,
    cache: Option<Arc<dyn SuggestionCache>>,
    clock: DayClock,
}

impl SuggestionService {
    /// Create the service; `cache` is `None` when no cache is configured.
    pub fn new(
        source: Arc<dyn SuggestionSource>,
        cache: Option<Arc<dyn SuggestionCache>>,
        clock: DayClock,
    ) -> Self {
        Self {
            source,
            cache,
            clock,
        }
    }

    async fn cached(&self, key: &SuggestionCacheKey) -> Option<Suggestion> {
        let cache = self.cache.as_ref()?;
        match cache.get(key).await {
            Ok(hit) => hit,
            Err(error) => {
                warn!(key = %key, error = %error, "suggestion cache read failed");
                None
            }
        }
    }

    async fn store(&self, key: &SuggestionCacheKey, suggestion: &Suggestion) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        if let Err(error) = cache.put(key, suggestion).await {
            warn!(key = %key, error = %error, "suggestion cache write failed");
        }
    }
}

#[async_trait]
impl SuggestionQuery for SuggestionService {
    async fn daily_suggestion(&self, owner: &OwnerId) -> Result<Suggestion, Error> {
        let today = self.clock.today();
        let key = suggestion_cache_key(owner, today)
            .inspect_err(|error| warn!(error = %error, "invalid suggestion cache key"))
            .ok();

        if let Some(key) = key.as_ref()
            && let Some(hit) = self.cached(key).await
        {
            debug!(owner = %owner, "suggestion cache hit");
            return Ok(hit);
        }

        match self.source.suggest(owner, today).await {
            Ok(suggestion) if suggestion.is_complete() => {
                if let Some(key) = key.as_ref() {
                    self.store(key, &suggestion).await;
                }
                Ok(suggestion)
            }
            Ok(_) => {
                warn!(owner = %owner, "suggestion source returned an incomplete suggestion");
                Ok(Suggestion::fallback())
            }
            Err(error) => {
                warn!(owner = %owner, error = %error, "suggestion source failed");
                Ok(Suggestion::fallback())
            }
        }
    }
}

#[cfg(test)]
#[path = "suggestion_service_tests.rs"]
mod tests;

//! Redis-backed suggestion cache.
//!
//! Entries are JSON documents stored under namespaced keys
//! (`suggestion:v1:<sha256>`) with a 24 hour TTL plus up to an hour of
//! random jitter so that a day's keys do not all expire together.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::Pool;
use bb8_redis::redis::AsyncCommands;
use rand::Rng;

use crate::domain::Suggestion;
use crate::domain::ports::{SuggestionCache, SuggestionCacheError, SuggestionCacheKey};

/// Base lifetime of a cached suggestion.
pub const SUGGESTION_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// Upper bound of the random extension added to [`SUGGESTION_TTL`].
pub const SUGGESTION_TTL_JITTER: Duration = Duration::from_secs(60 * 60);

/// TTL in whole seconds: `base` plus a uniform draw from `0..=jitter`.
pub fn jittered_ttl_secs(base: Duration, jitter: Duration, rng: &mut impl Rng) -> u64 {
    let extra = if jitter.is_zero() {
        0
    } else {
        rng.gen_range(0..=jitter.as_secs())
    };
    base.as_secs().saturating_add(extra)
}

/// Suggestion cache over a `bb8` pool of Redis connections.
#[derive(Clone)]
pub struct RedisSuggestionCache {
    pool: Pool<RedisConnectionManager>,
    ttl: Duration,
    jitter: Duration,
}

impl RedisSuggestionCache {
    /// Connect to `redis_url` with the default TTL.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionCacheError::Backend`] when the URL is invalid or
    /// the pool cannot be built.
    pub async fn connect(redis_url: &str) -> Result<Self, SuggestionCacheError> {
        let manager = RedisConnectionManager::new(redis_url)
            .map_err(|err| SuggestionCacheError::backend(err.to_string()))?;
        let pool = Pool::builder()
            .build(manager)
            .await
            .map_err(|err| SuggestionCacheError::backend(err.to_string()))?;
        Ok(Self {
            pool,
            ttl: SUGGESTION_TTL,
            jitter: SUGGESTION_TTL_JITTER,
        })
    }
}

fn encode(suggestion: &Suggestion) -> Result<String, SuggestionCacheError> {
    serde_json::to_string(suggestion)
        .map_err(|err| SuggestionCacheError::serialization(err.to_string()))
}

fn decode(payload: &str) -> Result<Suggestion, SuggestionCacheError> {
    serde_json::from_str(payload)
        .map_err(|err| SuggestionCacheError::serialization(err.to_string()))
}

#[async_trait]
impl SuggestionCache for RedisSuggestionCache {
    async fn get(
        &self,
        key: &SuggestionCacheKey,
    ) -> Result<Option<Suggestion>, SuggestionCacheError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| SuggestionCacheError::backend(err.to_string()))?;
        let payload: Option<String> = conn
            .get(key.as_str())
            .await
            .map_err(|err| SuggestionCacheError::backend(err.to_string()))?;
        payload.as_deref().map(decode).transpose()
    }

    async fn put(
        &self,
        key: &SuggestionCacheKey,
        suggestion: &Suggestion,
    ) -> Result<(), SuggestionCacheError> {
        let payload = encode(suggestion)?;
        let ttl = jittered_ttl_secs(self.ttl, self.jitter, &mut rand::thread_rng());
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| SuggestionCacheError::backend(err.to_string()))?;
        conn.set_ex::<_, _, ()>(key.as_str(), payload, ttl)
            .await
            .map_err(|err| SuggestionCacheError::backend(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn ttl_stays_within_jitter_window() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let ttl = jittered_ttl_secs(SUGGESTION_TTL, SUGGESTION_TTL_JITTER, &mut rng);
            assert!((86_400..=90_000).contains(&ttl));
        }
    }

    #[rstest]
    fn zero_jitter_keeps_base_ttl() {
        let mut rng = SmallRng::seed_from_u64(1);
        let ttl = jittered_ttl_secs(Duration::from_secs(30), Duration::ZERO, &mut rng);
        assert_eq!(ttl, 30);
    }

    #[rstest]
    fn payloads_round_trip_through_json() {
        let suggestion = Suggestion::new("Walk", "Fresh air");
        let decoded = decode(&encode(&suggestion).expect("encodes")).expect("decodes");
        assert_eq!(decoded, suggestion);
    }

    #[rstest]
    fn malformed_payload_is_a_serialisation_error() {
        assert!(matches!(
            decode("{not json"),
            Err(SuggestionCacheError::Serialization { .. })
        ));
    }
}

//! Tests for the daily suggestion service.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockable::{Clock, MockClock};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::DayBoundary;
use crate::domain::ports::{
    MockSuggestionCache, MockSuggestionSource, SuggestionCacheError, SuggestionSourceError,
};

#[fixture]
fn clock() -> DayClock {
    let mut clock = MockClock::new();
    clock.expect_utc().returning(|| {
        Utc.with_ymd_and_hms(2026, 10, 5, 6, 0, 0)
            .single()
            .expect("instant")
    });
    let clock: Arc<dyn Clock> = Arc::new(clock);
    DayClock::new(clock, DayBoundary::utc())
}

fn owner() -> OwnerId {
    OwnerId::new("owner-1").expect("owner")
}

fn fresh() -> Suggestion {
    Suggestion::new("Stretch for five minutes", "It loosens you up.")
}

#[rstest]
fn cache_key_is_namespaced_hex() {
    let day = CalendarDay::from_ymd(2026, 10, 5).expect("day");
    let key = suggestion_cache_key(&owner(), day).expect("key");
    let suffix = key
        .as_str()
        .strip_prefix("suggestion:v1:")
        .expect("namespace");
    assert_eq!(suffix.len(), 64);
    assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
}

#[rstest]
#[tokio::test]
async fn without_cache_the_source_is_used(clock: DayClock) {
    let mut source = MockSuggestionSource::new();
    source.expect_suggest().times(1).returning(|_, _| Ok(fresh()));
    let service = SuggestionService::new(Arc::new(source), None, clock);

    let suggestion = service.daily_suggestion(&owner()).await.expect("suggestion");
    assert_eq!(suggestion, fresh());
}

#[rstest]
#[tokio::test]
async fn cache_hit_skips_the_source(clock: DayClock) {
    let mut source = MockSuggestionSource::new();
    source.expect_suggest().times(0);
    let mut cache = MockSuggestionCache::new();
    cache.expect_get().returning(|_| Ok(Some(fresh())));
    cache.expect_put().times(0);
    let service = SuggestionService::new(Arc::new(source), Some(Arc::new(cache)), clock);

    let suggestion = service.daily_suggestion(&owner()).await.expect("suggestion");
    assert_eq!(suggestion, fresh());
}

#[rstest]
#[tokio::test]
async fn miss_populates_the_cache(clock: DayClock) {
    let mut source = MockSuggestionSource::new();
    source.expect_suggest().returning(|_, _| Ok(fresh()));
    let mut cache = MockSuggestionCache::new();
    cache.expect_get().returning(|_| Ok(None));
    cache
        .expect_put()
        .withf(|key, suggestion| key.as_str().starts_with("suggestion:v1:") && *suggestion == fresh())
        .times(1)
        .returning(|_, _| Ok(()));
    let service = SuggestionService::new(Arc::new(source), Some(Arc::new(cache)), clock);

    service.daily_suggestion(&owner()).await.expect("suggestion");
}

#[rstest]
#[tokio::test]
async fn failing_cache_degrades_to_recompute(clock: DayClock) {
    let mut source = MockSuggestionSource::new();
    source.expect_suggest().times(1).returning(|_, _| Ok(fresh()));
    let mut cache = MockSuggestionCache::new();
    cache
        .expect_get()
        .returning(|_| Err(SuggestionCacheError::backend("connection reset")));
    cache
        .expect_put()
        .returning(|_, _| Err(SuggestionCacheError::backend("connection reset")));
    let service = SuggestionService::new(Arc::new(source), Some(Arc::new(cache)), clock);

    let suggestion = service.daily_suggestion(&owner()).await.expect("suggestion");
    assert_eq!(suggestion, fresh());
}

#[rstest]
#[case(Err(SuggestionSourceError::status(503_u16)))]
#[case(Ok(Suggestion::new("", "")))]
#[tokio::test]
async fn unusable_source_answer_falls_back_uncached(
    clock: DayClock,
    #[case] answer: Result<Suggestion, SuggestionSourceError>,
) {
    let mut source = MockSuggestionSource::new();
    source.expect_suggest().return_once(move |_, _| answer);
    let mut cache = MockSuggestionCache::new();
    cache.expect_get().returning(|_| Ok(None));
    cache.expect_put().times(0);
    let service = SuggestionService::new(Arc::new(source), Some(Arc::new(cache)), clock);

    let suggestion = service.daily_suggestion(&owner()).await.expect("suggestion");
    assert_eq!(suggestion, Suggestion::fallback());
}

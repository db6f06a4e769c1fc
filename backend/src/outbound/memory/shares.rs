//! In-memory shared progress snapshots.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::lock;
use crate::domain::SharedProgress;
use crate::domain::ports::{SharedProgressRepository, SharedProgressRepositoryError};

/// Snapshots keyed by token.
#[derive(Debug, Default)]
pub struct InMemorySharedProgressRepository {
    shares: Mutex<HashMap<String, SharedProgress>>,
}

impl InMemorySharedProgressRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SharedProgressRepository for InMemorySharedProgressRepository {
    async fn insert(&self, shared: &SharedProgress) -> Result<(), SharedProgressRepositoryError> {
        let mut shares =
            lock(&self.shares, "share").map_err(SharedProgressRepositoryError::query)?;
        if shares.contains_key(&shared.token) {
            return Err(SharedProgressRepositoryError::query(
                "duplicate share token",
            ));
        }
        shares.insert(shared.token.clone(), shared.clone());
        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<SharedProgress>, SharedProgressRepositoryError> {
        let shares = lock(&self.shares, "share").map_err(SharedProgressRepositoryError::query)?;
        Ok(shares.get(token).cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::OwnerId;

    fn snapshot(token: &str) -> SharedProgress {
        let now = Utc::now();
        SharedProgress {
            token: token.to_owned(),
            owner: OwnerId::new("alice").expect("owner"),
            habit_id: None,
            image_url: "https://cdn.example/p.png".to_owned(),
            shared_at: now,
            expires_at: now + TimeDelta::days(7),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn stored_snapshot_is_found_by_token() {
        let repo = InMemorySharedProgressRepository::new();
        let stored = snapshot("t1");

        repo.insert(&stored).await.expect("insert");

        assert_eq!(repo.find_by_token("t1").await.expect("find"), Some(stored));
        assert!(repo.find_by_token("t2").await.expect("find").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn reused_token_is_refused() {
        let repo = InMemorySharedProgressRepository::new();

        repo.insert(&snapshot("t1")).await.expect("first insert");
        assert!(repo.insert(&snapshot("t1")).await.is_err());
    }
}

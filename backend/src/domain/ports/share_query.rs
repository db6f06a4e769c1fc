//! Driving port for resolving public share links.

use async_trait::async_trait;

use crate::domain::{Error, SharedProgress};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShareQuery: Send + Sync {
    /// Resolve `token`: `invalid_request` when it does not verify,
    /// `not_found` when no live snapshot matches.
    async fn shared_progress(&self, token: &str) -> Result<SharedProgress, Error>;
}

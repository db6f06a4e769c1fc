//! Port for shared progress snapshots.

use async_trait::async_trait;

use crate::domain::SharedProgress;

use super::define_port_error;

define_port_error! {
    /// Errors raised by share repository adapters.
    pub enum SharedProgressRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "share repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "share repository query failed: {message}",
    }
}

/// Port for snapshots keyed by their token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SharedProgressRepository: Send + Sync {
    /// Store a new snapshot.
    async fn insert(&self, shared: &SharedProgress) -> Result<(), SharedProgressRepositoryError>;

    /// Snapshot for `token`, expired or not.
    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<SharedProgress>, SharedProgressRepositoryError>;
}

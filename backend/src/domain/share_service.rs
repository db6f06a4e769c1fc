//! Share link issuing and resolution.
//!
//! Issuing signs the claims, stores the snapshot under the token, and
//! builds the public URL. Resolving verifies the signature first, then
//! requires a stored snapshot whose expiry is still ahead of the service
//! clock.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::habit_service::{habit_not_found, map_habit_repository_error};
use crate::domain::ports::{
    CreateShareRequest, HabitRepository, ShareCommand, ShareQuery, ShareTokenCodec,
    SharedProgressRepository, SharedProgressRepositoryError,
};
use crate::domain::{DayClock, Error, ShareClaims, ShareLink, SharedProgress};

fn map_share_repository_error(error: SharedProgressRepositoryError) -> Error {
    match error {
        SharedProgressRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("share repository unavailable: {message}"))
        }
        SharedProgressRepositoryError::Query { message } => {
            Error::internal(format!("share repository error: {message}"))
        }
    }
}

fn share_not_found() -> Error {
    Error::not_found("shared progress not found or expired")
}

/// Driven ports used by [`ShareService`].
#[derive(Clone)]
pub struct ShareServicePorts {
    /// Habit persistence, for ownership checks.
    pub habits: Arc<dyn HabitRepository>,
    /// Snapshot store.
    pub shares: Arc<dyn SharedProgressRepository>,
    /// Token signer.
    pub tokens: Arc<dyn ShareTokenCodec>,
}

/// Share service implementing the share driving ports.
#[derive(Clone)]
pub struct ShareService {
    ports: ShareServicePorts,
    clock: DayClock,
    public_base_url: String,
}

impl ShareService {
    /// Create the service; links are rooted at `public_base_url`.
    pub fn new(ports: ShareServicePorts, clock: DayClock, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_owned();
        Self {
            ports,
            clock,
            public_base_url,
        }
    }

    fn share_url(&self, token: &str) -> String {
        format!("{}/share/{token}", self.public_base_url)
    }
}

#[async_trait]
impl ShareCommand for ShareService {
    async fn create_share(&self, request: CreateShareRequest) -> Result<ShareLink, Error> {
        let CreateShareRequest {
            owner,
            image,
            habit_id,
        } = request;
        if let Some(habit_id) = habit_id {
            self.ports
                .habits
                .find_owned(&owner, &habit_id)
                .await
                .map_err(map_habit_repository_error)?
                .ok_or_else(|| habit_not_found(habit_id))?;
        }

        let claims = ShareClaims::issue(owner, habit_id, Uuid::new_v4(), self.clock.now());
        let token = self
            .ports
            .tokens
            .issue(&claims)
            .map_err(|err| Error::internal(err.to_string()))?;
        let record = SharedProgress::new(token.clone(), &claims, image);
        self.ports
            .shares
            .insert(&record)
            .await
            .map_err(map_share_repository_error)?;

        info!(owner = %claims.owner, token_id = %claims.token_id, "share link issued");
        Ok(ShareLink {
            share_url: self.share_url(&token),
            token,
            expires_at: record.expires_at,
        })
    }
}

#[async_trait]
impl ShareQuery for ShareService {
    async fn shared_progress(&self, token: &str) -> Result<SharedProgress, Error> {
        let claims = self.ports.tokens.decode(token).map_err(|err| {
            debug!(error = %err, "share token rejected");
            Error::invalid_request("share link is invalid")
        })?;
        let record = self
            .ports
            .shares
            .find_by_token(token)
            .await
            .map_err(map_share_repository_error)?
            .filter(|record| record.owner == claims.owner)
            .ok_or_else(share_not_found)?;
        if record.is_expired(self.clock.now()) {
            return Err(share_not_found());
        }
        Ok(record)
    }
}

#[cfg(test)]
#[path = "share_service_tests.rs"]
mod tests;

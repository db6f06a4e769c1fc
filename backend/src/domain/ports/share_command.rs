//! Driving port for creating share links.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, OwnerId, ShareImage, ShareLink};

/// Validated share input.
#[derive(Debug, Clone)]
pub struct CreateShareRequest {
    pub owner: OwnerId,
    pub image: ShareImage,
    /// Habit the snapshot belongs to; must be owned by `owner`.
    pub habit_id: Option<Uuid>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShareCommand: Send + Sync {
    /// Issue a public link valid for seven days.
    async fn create_share(&self, request: CreateShareRequest) -> Result<ShareLink, Error>;
}

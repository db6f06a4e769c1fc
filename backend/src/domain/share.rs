//! Public share links for a progress snapshot.
//!
//! A link is a signed token naming the owner and, optionally, one habit.
//! The stored record carries the image and the expiry; the token is only
//! trusted once its signature checks out and the record is still live.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::user::OwnerId;

/// Lifetime of a share link.
pub const SHARE_TTL_DAYS: i64 = 7;

/// Longest accepted image reference, enough for a small inline PNG.
pub const MAX_IMAGE_URL_LEN: usize = 512 * 1024;

const IMAGE_SCHEMES: [&str; 3] = ["https://", "http://", "data:image/"];

/// Validation errors for share input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareValidationError {
    #[error("imageUrl is required")]
    EmptyImage,
    #[error("imageUrl must be at most {max} characters")]
    ImageTooLong { max: usize },
    #[error("imageUrl must be an http(s) URL or a data:image URI")]
    UnsupportedImage,
}

/// Trimmed image reference: a web URL or an inline `data:image/` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareImage(String);

impl ShareImage {
    /// Validate an image reference.
    ///
    /// # Errors
    ///
    /// Returns [`ShareValidationError`] when blank, oversized, or using a
    /// scheme other than `http`, `https`, or `data:image/`.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ShareValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ShareValidationError::EmptyImage);
        }
        if trimmed.chars().count() > MAX_IMAGE_URL_LEN {
            return Err(ShareValidationError::ImageTooLong {
                max: MAX_IMAGE_URL_LEN,
            });
        }
        let lowered = trimmed.get(..11).unwrap_or(trimmed).to_ascii_lowercase();
        if !IMAGE_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
            return Err(ShareValidationError::UnsupportedImage);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the reference.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Claims sealed into a share token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareClaims {
    pub owner: OwnerId,
    pub habit_id: Option<Uuid>,
    /// Makes every token unique, even for identical snapshots.
    pub token_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ShareClaims {
    /// Claims for a link issued at `now`, valid for [`SHARE_TTL_DAYS`].
    #[must_use]
    pub fn issue(owner: OwnerId, habit_id: Option<Uuid>, token_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            owner,
            habit_id,
            token_id,
            issued_at: now,
            expires_at: now + TimeDelta::days(SHARE_TTL_DAYS),
        }
    }
}

/// A stored snapshot reachable through its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedProgress {
    pub token: String,
    pub owner: OwnerId,
    pub habit_id: Option<Uuid>,
    pub image_url: String,
    pub shared_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SharedProgress {
    /// Record for `token` carrying `image`, expiring with the claims.
    #[must_use]
    pub fn new(token: String, claims: &ShareClaims, image: ShareImage) -> Self {
        Self {
            token,
            owner: claims.owner.clone(),
            habit_id: claims.habit_id,
            image_url: image.0,
            shared_at: claims.issued_at,
            expires_at: claims.expires_at,
        }
    }

    /// A link stops resolving at the instant it expires.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Response to a share request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    pub share_url: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

//! Owner identity supplied by the external identity provider.
//!
//! Every entity is scoped to exactly one [`OwnerId`]. The identifier is the
//! provider's opaque subject id; the domain never interprets it.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_OWNER_ID_LEN: usize = 128;

/// Validation errors for owner identity values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnerValidationError {
    /// Identifier is empty once trimmed.
    #[error("owner id must not be empty")]
    EmptyId,
    /// Identifier carries leading or trailing whitespace.
    #[error("owner id must not contain surrounding whitespace")]
    PaddedId,
    /// Identifier is longer than the provider ever issues.
    #[error("owner id must be at most {max} characters")]
    IdTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Email lacks an `@` separator.
    #[error("owner email is malformed")]
    InvalidEmail,
}

/// Opaque identity-provider subject id.
///
/// # Examples
/// ```
/// use habitwise::domain::OwnerId;
///
/// let owner = OwnerId::new("firebase-uid-123").expect("valid id");
/// assert_eq!(owner.as_str(), "firebase-uid-123");
/// assert!(OwnerId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerId(String);

impl OwnerId {
    /// Validate and wrap a subject id.
    ///
    /// # Errors
    ///
    /// Returns [`OwnerValidationError`] for blank, padded, or oversized ids.
    pub fn new(value: impl Into<String>) -> Result<Self, OwnerValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(OwnerValidationError::EmptyId);
        }
        if value.trim() != value {
            return Err(OwnerValidationError::PaddedId);
        }
        if value.chars().count() > MAX_OWNER_ID_LEN {
            return Err(OwnerValidationError::IdTooLong {
                max: MAX_OWNER_ID_LEN,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OwnerId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for OwnerId {
    type Error = OwnerValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OwnerId> for String {
    fn from(value: OwnerId) -> Self {
        value.0
    }
}

/// Verified caller identity for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    owner: OwnerId,
    email: Option<String>,
}

impl Identity {
    /// Build an identity, normalising a blank email to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`OwnerValidationError::InvalidEmail`] when a non-blank email
    /// has no `@`.
    pub fn new(owner: OwnerId, email: Option<String>) -> Result<Self, OwnerValidationError> {
        let email = email
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty());
        if email.as_deref().is_some_and(|raw| !raw.contains('@')) {
            return Err(OwnerValidationError::InvalidEmail);
        }
        Ok(Self { owner, email })
    }

    /// Identity without an email address.
    #[must_use]
    pub const fn without_email(owner: OwnerId) -> Self {
        Self { owner, email: None }
    }

    /// Owner identifier.
    #[must_use]
    pub const fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Verified email, when the provider supplied one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", OwnerValidationError::EmptyId)]
    #[case(" uid", OwnerValidationError::PaddedId)]
    fn rejects_malformed_ids(#[case] raw: &str, #[case] expected: OwnerValidationError) {
        assert_eq!(OwnerId::new(raw), Err(expected));
    }

    #[rstest]
    fn rejects_oversized_ids() {
        let raw = "u".repeat(MAX_OWNER_ID_LEN + 1);
        assert!(matches!(
            OwnerId::new(raw),
            Err(OwnerValidationError::IdTooLong { .. })
        ));
    }

    #[rstest]
    fn identity_drops_blank_email() {
        let owner = OwnerId::new("uid").expect("owner");
        let identity = Identity::new(owner, Some("  ".to_owned())).expect("identity");
        assert_eq!(identity.email(), None);
    }

    #[rstest]
    fn identity_rejects_email_without_at() {
        let owner = OwnerId::new("uid").expect("owner");
        assert_eq!(
            Identity::new(owner, Some("nobody".to_owned())),
            Err(OwnerValidationError::InvalidEmail)
        );
    }
}

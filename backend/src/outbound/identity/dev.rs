//! Development-only identity verifier.

use async_trait::async_trait;

use crate::domain::ports::{IdentityVerifier, IdentityVerifierError};
use crate::domain::{Identity, OwnerId};

const PREFIX: &str = "dev:";

/// Accepts `dev:<uid>` or `dev:<uid>:<email>` tokens without any signature.
///
/// Only wired when no JWT secret is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DevIdentityVerifier;

impl DevIdentityVerifier {
    fn parse(token: &str) -> Result<Identity, IdentityVerifierError> {
        let rest = token
            .strip_prefix(PREFIX)
            .ok_or_else(|| IdentityVerifierError::rejected("expected a dev: token"))?;
        let (uid, email) = match rest.split_once(':') {
            Some((uid, email)) => (uid, Some(email.to_owned())),
            None => (rest, None),
        };
        let owner = OwnerId::new(uid)
            .map_err(|err| IdentityVerifierError::rejected(format!("invalid subject: {err}")))?;
        Identity::new(owner, email)
            .map_err(|err| IdentityVerifierError::rejected(format!("invalid email: {err}")))
    }
}

#[async_trait]
impl IdentityVerifier for DevIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, IdentityVerifierError> {
        Self::parse(token)
    }
}

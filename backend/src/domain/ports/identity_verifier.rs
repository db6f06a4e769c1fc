//! Port for verifying bearer tokens issued by the identity provider.

use async_trait::async_trait;

use crate::domain::Identity;

use super::define_port_error;

define_port_error! {
    /// Errors raised while verifying a token.
    pub enum IdentityVerifierError {
        /// Token is malformed, unsigned, or signed with the wrong key.
        Rejected { message: String } => "token rejected: {message}",
        /// Token signature is valid but it has expired.
        Expired => "token expired",
        /// The verifier backend could not be reached.
        Unavailable { message: String } => "identity provider unavailable: {message}",
    }
}

/// Turns an opaque bearer token into a verified [`Identity`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify `token` and return the caller's identity.
    async fn verify(&self, token: &str) -> Result<Identity, IdentityVerifierError>;
}

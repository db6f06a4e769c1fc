//! Port for signing and opening share tokens.

use crate::domain::ShareClaims;

use super::define_port_error;

define_port_error! {
    /// Errors raised by share token codecs.
    pub enum ShareTokenError {
        /// Claims could not be signed.
        Signing { message: String } => "share token signing failed: {message}",
        /// Token is malformed, tampered with, or signed with another key.
        Invalid { message: String } => "share token invalid: {message}",
    }
}

/// Seals [`ShareClaims`] into an opaque URL-safe token and back.
///
/// Decoding checks the signature only; expiry is judged against the stored
/// record and the service clock.
#[cfg_attr(test, mockall::automock)]
pub trait ShareTokenCodec: Send + Sync {
    /// Sign `claims`.
    fn issue(&self, claims: &ShareClaims) -> Result<String, ShareTokenError>;

    /// Verify `token` and return its claims.
    fn decode(&self, token: &str) -> Result<ShareClaims, ShareTokenError>;
}

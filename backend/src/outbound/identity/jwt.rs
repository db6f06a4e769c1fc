//! HS256 JWT verification.
//!
//! The `sub` claim becomes the owner and the optional `email` claim is kept
//! for reminder mail. The shared secret is zeroed when the verifier drops.

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::ports::{IdentityVerifier, IdentityVerifierError};
use crate::domain::{Identity, OwnerId};

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

/// Token expectations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JwtSettings {
    /// Required `iss` claim.
    pub issuer: Option<String>,
    /// Required `aud` claim.
    pub audience: Option<String>,
}

/// Verifies HS256 tokens signed with a shared secret.
pub struct JwtIdentityVerifier {
    secret: Zeroizing<Vec<u8>>,
    validation: Validation,
}

impl JwtIdentityVerifier {
    /// Verifier for `secret` with the given expectations.
    pub fn new(secret: Zeroizing<String>, settings: JwtSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = settings.issuer.as_deref() {
            validation.set_issuer(&[issuer]);
        }
        match settings.audience.as_deref() {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        Self {
            secret: Zeroizing::new(secret.as_bytes().to_vec()),
            validation,
        }
    }

    fn verify_sync(&self, token: &str) -> Result<Identity, IdentityVerifierError> {
        let key = DecodingKey::from_secret(&self.secret);
        let data = decode::<Claims>(token, &key, &self.validation).map_err(map_jwt_error)?;
        let owner = OwnerId::new(data.claims.sub)
            .map_err(|err| IdentityVerifierError::rejected(format!("invalid subject: {err}")))?;
        Identity::new(owner, data.claims.email)
            .map_err(|err| IdentityVerifierError::rejected(format!("invalid email claim: {err}")))
    }
}

fn map_jwt_error(error: jsonwebtoken::errors::Error) -> IdentityVerifierError {
    match error.kind() {
        ErrorKind::ExpiredSignature => IdentityVerifierError::expired(),
        _ => IdentityVerifierError::rejected(error.to_string()),
    }
}

#[async_trait]
impl IdentityVerifier for JwtIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, IdentityVerifierError> {
        self.verify_sync(token)
    }
}

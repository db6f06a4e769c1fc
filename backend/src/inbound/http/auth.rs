//! Bearer-token authentication for HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! credential checks and identity derivation here. Handlers take an
//! [`Authenticated`] argument; the extractor reads `Authorization: Bearer
//! <token>` and asks the configured [`IdentityVerifier`] who the caller is.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::ports::{IdentityVerifier, IdentityVerifierError};
use crate::domain::{Error, Identity, OwnerId};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Caller identity resolved from the bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated(pub Identity);

impl Authenticated {
    /// Owner id of the caller.
    pub fn owner(&self) -> &OwnerId {
        self.0.owner()
    }

    /// Full identity, including the optional email claim.
    pub fn identity(&self) -> &Identity {
        &self.0
    }

    pub fn into_identity(self) -> Identity {
        self.0
    }
}

/// Extract the bearer token from `headers`.
///
/// # Errors
///
/// Returns `401 Unauthorized` when the header is absent, not UTF-8, uses
/// another scheme, or carries an empty token.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, Error> {
    let raw = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let token = raw
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .ok_or_else(|| Error::unauthorized("authorization scheme must be Bearer"))?;
    if token.is_empty() {
        return Err(Error::unauthorized("missing bearer token"));
    }
    Ok(token)
}

/// Verify `token`, mapping verifier failures to domain errors.
pub async fn verify_token(
    verifier: &dyn IdentityVerifier,
    token: &str,
) -> Result<Identity, Error> {
    verifier.verify(token).await.map_err(|error| match error {
        IdentityVerifierError::Expired => Error::unauthorized("token expired"),
        IdentityVerifierError::Rejected { message } => {
            debug!(%message, "bearer token rejected");
            Error::unauthorized("invalid token")
        }
        IdentityVerifierError::Unavailable { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
    })
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = bearer_token(req.headers()).map(str::to_owned);
        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("identity verifier is not configured"))?;
            let token = token?;
            verify_token(state.identity.as_ref(), &token)
                .await
                .map(Authenticated)
        })
    }
}

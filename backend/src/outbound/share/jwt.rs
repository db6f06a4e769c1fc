//! HS256 share tokens.
//!
//! Tokens carry their own audience so they never verify as bearer tokens,
//! even if an operator reuses the identity secret. `exp` is written for
//! other consumers but not enforced here: the stored record decides expiry.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::ports::{ShareTokenCodec, ShareTokenError};
use crate::domain::{OwnerId, ShareClaims};

const SHARE_AUDIENCE: &str = "habitwise:share";
const EPHEMERAL_SECRET_LEN: usize = 32;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenClaims {
    owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    habit_id: Option<Uuid>,
    jti: Uuid,
    iat: i64,
    exp: i64,
    aud: String,
}

/// Signs share claims with a shared secret.
pub struct JwtShareTokenCodec {
    secret: Zeroizing<Vec<u8>>,
    validation: Validation,
}

impl JwtShareTokenCodec {
    /// Codec for `secret`.
    pub fn new(secret: Zeroizing<String>) -> Self {
        Self::from_bytes(Zeroizing::new(secret.as_bytes().to_vec()))
    }

    /// Codec with a random secret; links die with the process.
    pub fn ephemeral() -> Self {
        let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
        rand::thread_rng().fill_bytes(&mut secret);
        Self::from_bytes(secret)
    }

    fn from_bytes(secret: Zeroizing<Vec<u8>>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_audience(&[SHARE_AUDIENCE]);
        Self { secret, validation }
    }
}

fn timestamp(secs: i64, claim: &str) -> Result<DateTime<Utc>, ShareTokenError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| ShareTokenError::invalid(format!("{claim} out of range")))
}

impl ShareTokenCodec for JwtShareTokenCodec {
    fn issue(&self, claims: &ShareClaims) -> Result<String, ShareTokenError> {
        let body = TokenClaims {
            owner: claims.owner.as_str().to_owned(),
            habit_id: claims.habit_id,
            jti: claims.token_id,
            iat: claims.issued_at.timestamp(),
            exp: claims.expires_at.timestamp(),
            aud: SHARE_AUDIENCE.to_owned(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &body,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|err| ShareTokenError::signing(err.to_string()))
    }

    fn decode(&self, token: &str) -> Result<ShareClaims, ShareTokenError> {
        let key = DecodingKey::from_secret(&self.secret);
        let data = decode::<TokenClaims>(token, &key, &self.validation)
            .map_err(|err| ShareTokenError::invalid(err.to_string()))?;
        let body = data.claims;
        let owner = OwnerId::new(body.owner)
            .map_err(|err| ShareTokenError::invalid(format!("invalid owner: {err}")))?;
        Ok(ShareClaims {
            owner,
            habit_id: body.habit_id,
            token_id: body.jti,
            issued_at: timestamp(body.iat, "iat")?,
            expires_at: timestamp(body.exp, "exp")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;

    const SECRET: &str = "share-secret-with-enough-entropy";

    #[fixture]
    fn codec() -> JwtShareTokenCodec {
        JwtShareTokenCodec::new(Zeroizing::new(SECRET.to_owned()))
    }

    fn claims(issued_at: DateTime<Utc>) -> ShareClaims {
        ShareClaims::issue(
            OwnerId::new("user-7").expect("owner"),
            Some(Uuid::new_v4()),
            Uuid::new_v4(),
            issued_at,
        )
    }

    fn whole_second() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 3, 4, 5, 6)
            .single()
            .expect("instant")
    }

    #[rstest]
    fn issued_tokens_open_to_the_same_claims(codec: JwtShareTokenCodec) {
        let sealed = claims(whole_second());
        let token = codec.issue(&sealed).expect("signs");

        assert_eq!(codec.decode(&token).expect("opens"), sealed);
    }

    #[rstest]
    fn expiry_is_left_to_the_caller(codec: JwtShareTokenCodec) {
        let stale = claims(Utc::now() - TimeDelta::days(30));
        let token = codec.issue(&stale).expect("signs");

        assert!(codec.decode(&token).is_ok());
    }

    #[rstest]
    fn tokens_from_another_key_are_invalid(codec: JwtShareTokenCodec) {
        let other = JwtShareTokenCodec::ephemeral();
        let token = other.issue(&claims(whole_second())).expect("signs");

        assert!(matches!(
            codec.decode(&token),
            Err(ShareTokenError::Invalid { .. })
        ));
    }

    #[rstest]
    fn bearer_shaped_tokens_lack_the_share_audience(codec: JwtShareTokenCodec) {
        let bearer = encode(
            &Header::new(Algorithm::HS256),
            &json!({ "sub": "user-7", "owner": "user-7", "jti": Uuid::nil(), "iat": 0, "exp": 1 }),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("signs");

        assert!(codec.decode(&bearer).is_err());
    }

    #[rstest]
    #[case("not-a-jwt")]
    #[case("")]
    fn garbage_is_invalid(codec: JwtShareTokenCodec, #[case] token: &str) {
        assert!(matches!(
            codec.decode(token),
            Err(ShareTokenError::Invalid { .. })
        ));
    }
}

//! JWT session token adapter.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{DEFAULT_TOKEN_TTL_DAYS, TasklaneConfig};
use crate::identity::{
    domain::UserId,
    ports::{SessionToken, TokenError, TokenIssuer, TokenResult},
};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    iat: i64,
    exp: i64,
}

/// HS256-signed JWT issuer.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for JwtTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl JwtTokenIssuer {
    /// Creates an issuer signing with `secret` and issuing tokens valid for
    /// `ttl`.
    #[must_use]
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Creates an issuer from runtime configuration.
    #[must_use]
    pub fn from_config(config: &TasklaneConfig) -> Self {
        let ttl = Duration::try_days(config.token_ttl_days)
            .unwrap_or_else(|| Duration::days(DEFAULT_TOKEN_TTL_DAYS));
        Self::new(&config.jwt_secret, ttl)
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: UserId, issued_at: DateTime<Utc>) -> TokenResult<SessionToken> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Signing("token expiry out of range".to_owned()))?;
        let claims = Claims {
            sub: user_id.into_inner(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let value = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::Signing(err.to_string()))?;
        Ok(SessionToken { value, expires_at })
    }

    fn verify(&self, token: &str) -> TokenResult<UserId> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;
        Ok(UserId::from_uuid(data.claims.sub))
    }
}

//! Access tokens.
//!
//! Access tokens are HS256-signed JWTs carrying the user id in `sub`. There
//! are no refresh tokens: a client signs in again once the token expires.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id, as a string.
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    /// Numeric user id, `None` when `sub` was not issued by this server.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

impl JwtConfig {
    pub const DEFAULT_EXPIRATION_HOURS: i64 = 24;

    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours: Self::DEFAULT_EXPIRATION_HOURS,
        }
    }

    pub fn issue(&self, user_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::hours(self.expiration_hours)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Checks signature and expiry.
    pub fn validate(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig::new("test-secret-that-is-long-enough-for-hmac")
    }

    #[test]
    fn issued_token_validates() {
        let config = config();
        let token = config.issue(42).unwrap();

        let claims = config.validate(&token).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(
            claims.exp - claims.iat,
            JwtConfig::DEFAULT_EXPIRATION_HOURS * 3600
        );
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn expired_token_fails() {
        let config = config();
        // Past the default 60 s leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "1".to_string(),
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(config.validate(&token).is_err());
    }

    #[test]
    fn other_secret_fails() {
        let token = JwtConfig::new("secret-alpha").issue(1).unwrap();
        assert!(JwtConfig::new("secret-bravo").validate(&token).is_err());
    }

    #[test]
    fn foreign_subject_has_no_user_id() {
        let claims = Claims {
            sub: "alice".to_string(),
            exp: 0,
            iat: 0,
            jti: String::new(),
        };
        assert_eq!(claims.user_id(), None);
    }
}

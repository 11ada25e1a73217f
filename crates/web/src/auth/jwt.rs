//! HS256 access and refresh tokens.
//!
//! Both token kinds share the issuer but use distinct audiences and a
//! `type` claim, so a refresh token is never accepted where an access token
//! is expected and vice versa.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use storage::dto::auth::SessionUser;
use thiserror::Error;
use uuid::Uuid;

pub const ISSUER: &str = "deportyapp";
pub const ACCESS_AUDIENCE: &str = "deportyapp:access";
pub const REFRESH_AUDIENCE: &str = "deportyapp:refresh";

pub const ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;
pub const REFRESH_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;
/// A refresh token unused for this long is rejected even if not expired.
pub const REFRESH_IDLE_TTL_SECS: i64 = 30 * 24 * 60 * 60;

pub const ACCESS_COOKIE: &str = "deporty_access";
pub const REFRESH_COOKIE: &str = "deporty_refresh";

const ACCESS_TYPE: &str = "access";
const REFRESH_TYPE: &str = "refresh";

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("invalid token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("unexpected token type")]
    WrongType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub user: SessionUser,
    #[serde(rename = "type")]
    pub token_type: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub token_type: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn sign_access(&self, user: &SessionUser) -> Result<String, JwtError> {
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            user: user.clone(),
            token_type: ACCESS_TYPE.to_string(),
            iss: ISSUER.to_string(),
            aud: ACCESS_AUDIENCE.to_string(),
            iat: now,
            exp: now + ACCESS_TOKEN_TTL_SECS,
            jti: random_jti(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    pub fn sign_refresh(&self, user_id: Uuid) -> Result<String, JwtError> {
        let now = Utc::now().timestamp();
        let claims = RefreshClaims {
            user_id,
            token_type: REFRESH_TYPE.to_string(),
            iss: ISSUER.to_string(),
            aud: REFRESH_AUDIENCE.to_string(),
            iat: now,
            exp: now + REFRESH_TOKEN_TTL_SECS,
            jti: random_jti(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, JwtError> {
        let data = decode::<AccessClaims>(token, &self.decoding, &validation(ACCESS_AUDIENCE))?;
        if data.claims.token_type != ACCESS_TYPE {
            return Err(JwtError::WrongType);
        }
        Ok(data.claims)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, JwtError> {
        let data = decode::<RefreshClaims>(token, &self.decoding, &validation(REFRESH_AUDIENCE))?;
        if data.claims.token_type != REFRESH_TYPE {
            return Err(JwtError::WrongType);
        }
        Ok(data.claims)
    }
}

fn validation(audience: &str) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.set_audience(&[audience]);
    validation.leeway = 0;
    validation
}

fn random_jti() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            email: "ana@deporty.app".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Rojas".to_string(),
            country_code: Some("CO".to_string()),
            city: Some("Medellín".to_string()),
            role: Some("user".to_string()),
        }
    }

    #[test]
    fn test_access_round_trip() {
        let keys = JwtKeys::new("test-secret");
        let user = user();
        let token = keys.sign_access(&user).unwrap();
        let claims = keys.verify_access(&token).unwrap();

        assert_eq!(claims.user, user);
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL_SECS);
    }

    #[test]
    fn test_refresh_round_trip() {
        let keys = JwtKeys::new("test-secret");
        let id = Uuid::new_v4();
        let claims = keys.verify_refresh(&keys.sign_refresh(id).unwrap()).unwrap();

        assert_eq!(claims.user_id, id);
        assert_eq!(claims.exp - claims.iat, REFRESH_TOKEN_TTL_SECS);
    }

    #[test]
    fn test_audiences_are_not_interchangeable() {
        let keys = JwtKeys::new("test-secret");
        let user = user();

        let access = keys.sign_access(&user).unwrap();
        let refresh = keys.sign_refresh(user.id).unwrap();

        assert!(keys.verify_refresh(&access).is_err());
        assert!(keys.verify_access(&refresh).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = JwtKeys::new("secret-a").sign_access(&user()).unwrap();
        assert!(JwtKeys::new("secret-b").verify_access(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = JwtKeys::new("test-secret");
        let now = Utc::now().timestamp();
        let claims = RefreshClaims {
            user_id: Uuid::new_v4(),
            token_type: REFRESH_TYPE.to_string(),
            iss: ISSUER.to_string(),
            aud: REFRESH_AUDIENCE.to_string(),
            iat: now - 7200,
            exp: now - 3600,
            jti: random_jti(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).unwrap();

        assert!(keys.verify_refresh(&token).is_err());
    }

    #[test]
    fn test_type_claim_is_checked() {
        let keys = JwtKeys::new("test-secret");
        let now = Utc::now().timestamp();
        let claims = RefreshClaims {
            user_id: Uuid::new_v4(),
            token_type: ACCESS_TYPE.to_string(),
            iss: ISSUER.to_string(),
            aud: REFRESH_AUDIENCE.to_string(),
            iat: now,
            exp: now + 60,
            jti: random_jti(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).unwrap();

        assert!(matches!(keys.verify_refresh(&token), Err(JwtError::WrongType)));
    }

    #[test]
    fn test_tokens_issued_together_differ() {
        let keys = JwtKeys::new("test-secret");
        let id = Uuid::new_v4();
        assert_ne!(keys.sign_refresh(id).unwrap(), keys.sign_refresh(id).unwrap());
    }
}

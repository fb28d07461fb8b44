//! Session token service
//!
//! Tokens are HS256 JWTs carrying whatever JSON object the caller supplied at
//! issuance plus `iat`/`exp`. Nothing is stored server-side: a token is valid
//! as long as its signature checks out and it has not expired.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde_json::Value;
use thiserror::Error;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::SessionClaims,
};

/// Why a presented token was refused
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("session token is malformed")]
    Malformed,

    #[error("session token signature is invalid")]
    InvalidSignature,

    #[error("session token has expired")]
    Expired,
}

#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
}

impl SessionService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.access_token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.access_token_secret.as_bytes()),
            validation,
            ttl_seconds: config.token_expiration_hours as i64 * 3600,
        }
    }

    /// Sign `payload` into a token expiring after the configured lifetime
    pub fn issue(&self, payload: Value) -> AppResult<String> {
        self.issue_at(payload, Utc::now().timestamp())
    }

    /// Same as [`issue`](Self::issue) with an explicit issue time (seconds since epoch)
    pub fn issue_at(&self, payload: Value, issued_at: i64) -> AppResult<String> {
        let Value::Object(mut payload) = payload else {
            return Err(AppError::BadRequest(
                "Token payload must be a JSON object".to_string(),
            ));
        };

        payload.remove("iat");
        payload.remove("exp");

        let claims = SessionClaims {
            payload,
            iat: issued_at,
            exp: issued_at + self.ttl_seconds,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Check signature and expiry, returning the decoded claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}

//! Auth - admin login and HS256 bearer tokens.
//!
//! `auth.login` trades the configured admin credentials for a signed token.
//! Every other command must present that token as `authorization: Bearer
//! <token>`; [`Authenticator::verify`] checks its signature and expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::HandlerError;
use crate::store::Timestamp;

/// Token payload. Times are Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
}

/// A login attempt, or the configured admin account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// What a successful login returns.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: Timestamp,
}

pub struct Authenticator {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
    admin: Credentials,
}

impl Authenticator {
    pub fn new(secret: &str, token_ttl: Duration, admin: Credentials) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_nbf = true;
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_ttl,
            admin,
        }
    }

    /// Issue a token if `attempt` matches the admin account.
    pub fn login(&self, attempt: &Credentials) -> Result<IssuedToken, HandlerError> {
        if attempt.username != self.admin.username || attempt.password != self.admin.password {
            tracing::debug!(username = %attempt.username, "login refused");
            return Err(HandlerError::Unauthorized("wrong username or password".into()));
        }
        let issued = self.issue_at(&attempt.username, Utc::now())?;
        tracing::info!(username = %attempt.username, expires_at = %issued.expires_at, "login");
        Ok(issued)
    }

    /// Sign a token for `username` as if issued at `issued_at`.
    pub fn issue_at(&self, username: &str, issued_at: Timestamp) -> Result<IssuedToken, HandlerError> {
        let expires_at = issued_at + self.token_ttl;
        let claims = Claims {
            username: username.to_string(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            nbf: issued_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| HandlerError::Internal(format!("token signing failed: {}", e)))?;
        Ok(IssuedToken {
            token,
            token_type: "Bearer",
            expires_at,
        })
    }

    /// Check signature, algorithm and expiry; return the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, HandlerError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => "token expired",
                    ErrorKind::ImmatureSignature => "token not yet valid",
                    ErrorKind::InvalidSignature => "bad token signature",
                    _ => "malformed token",
                };
                tracing::debug!(error = %e, reason, "token rejected");
                HandlerError::Unauthorized(reason.into())
            })
    }
}

//! Session token issuance and verification (HS256 JWT).
//!
//! Tokens embed the caller's username (`sub`), numeric user id (`id`) and
//! role. The signing secret is loaded once at startup and the resulting
//! [`TokenService`] is shared read-only for the life of the process.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::identity::{Identity, Role};

/// Minimum accepted signing secret length in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Default token lifetime: 20 minutes.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 1200;

/// Error type for token operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token is missing required claims")]
    InvalidClaims,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// JWT claims carried by every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// User ID
    pub id: i64,
    /// Role at the time of issuance
    #[serde(default)]
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Unique token identifier
    pub jti: String,
}

/// A freshly signed token with its metadata.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub jti: String,
    pub expires_in: i64,
}

/// Issues and verifies signed, time-limited session tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_secs", &self.ttl_secs)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl TokenService {
    /// Creates a token service from a symmetric secret.
    ///
    /// # Arguments
    /// * `secret` - HMAC secret, at least [`MIN_SECRET_LEN`] bytes
    /// * `ttl_secs` - Lifetime of issued tokens in seconds
    pub fn new(secret: &str, ttl_secs: i64) -> Result<Self, JwtError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(JwtError::InvalidKey(format!(
                "Secret must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }
        if ttl_secs <= 0 {
            return Err(JwtError::InvalidKey(
                "Token lifetime must be positive".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        })
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issues a token for the given user.
    pub fn issue(&self, user_id: i64, username: &str, role: Role) -> Result<IssuedToken, JwtError> {
        self.issue_at(user_id, username, role, Utc::now())
    }

    fn issue_at(
        &self,
        user_id: i64,
        username: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let jti = Uuid::new_v4().to_string();
        let claims = Claims {
            sub: username.to_string(),
            id: user_id,
            role,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
            jti: jti.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))?;

        Ok(IssuedToken {
            token,
            jti,
            expires_in: self.ttl_secs,
        })
    }

    /// Validates a token and returns its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Expiry is compared against this process's clock with no skew allowance
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    ErrorKind::MissingRequiredClaim(_) | ErrorKind::Json(_) => {
                        JwtError::InvalidClaims
                    }
                    _ => JwtError::InvalidToken,
                }
            })?;

        let claims = token_data.claims;
        if claims.sub.is_empty() || claims.id <= 0 {
            return Err(JwtError::InvalidClaims);
        }
        Ok(claims)
    }

    /// Verifies a token and resolves the caller's identity.
    pub fn verify(&self, token: &str) -> Result<Identity, JwtError> {
        let claims = self.validate(token)?;
        Ok(Identity {
            id: claims.id,
            username: claims.sub,
            role: claims.role,
        })
    }
}

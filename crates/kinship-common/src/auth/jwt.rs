//! JWT verification for access tokens issued by the auth service
//!
//! Tokens are HS256-signed with a shared secret. The subject is the user's
//! UUID; the audience is normally `authenticated`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::AppError;

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user UUID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Auth-service role, e.g. `authenticated`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Claims {
    /// Get the user ID
    ///
    /// # Errors
    /// Returns `InvalidToken` if the subject is not a UUID
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Verifies bearer tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    audience: Option<String>,
}

impl JwtService {
    /// Create a verifier for the given secret; `audience` of `None` skips the `aud` check
    #[must_use]
    pub fn new(secret: &str, audience: Option<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            audience,
        }
    }

    #[must_use]
    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(&config.secret, config.audience.clone())
    }

    /// Decode and validate a token
    ///
    /// # Errors
    /// Returns `TokenExpired` for expired tokens and `InvalidToken` otherwise
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        match &self.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }

    /// Validate a token and return the user it was issued to
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or its subject is not a UUID
    pub fn authenticate(&self, token: &str) -> Result<Uuid, AppError> {
        self.decode_token(token)?.user_id()
    }

    /// Mint a token the way the auth service does
    ///
    /// Used by tests and local tooling; production tokens come from the auth service.
    ///
    /// # Errors
    /// Returns an error if encoding fails
    pub fn issue_token(&self, user_id: Uuid, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            aud: self.audience.clone(),
            email: None,
            role: Some("authenticated".to_string()),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to encode JWT: {e}")))
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

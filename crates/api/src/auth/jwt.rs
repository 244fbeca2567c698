//! Bearer token issuing and verification.
//!
//! Tokens are HMAC-signed JWTs carrying a [`Claims`] payload and expire a
//! fixed 24 hours after issue. There is no revocation: a token stays valid
//! until `exp`.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tasktrack_core::types::DbId;
use uuid::Uuid;

/// Token lifetime from issue to expiry.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Value of the `iss` claim on every token this service issues.
pub const TOKEN_ISSUER: &str = "tasktrack-api";

/// Fallback signing secret when `JWT_SECRET` is not configured.
///
/// Only suitable for local development; startup logs a warning when it is used.
pub const DEFAULT_JWT_SECRET: &str = "tasktrack-insecure-development-secret";

/// Algorithms accepted on verification. Anything outside the HMAC family,
/// including `none`, is rejected.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub user_id: DbId,
    pub username: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    pub iss: String,
    /// Unique token identifier (UUID v4) for audit logs.
    pub jti: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Bad signature, wrong algorithm, wrong issuer, expired, or malformed.
    /// Callers never learn which.
    #[error("Invalid or expired token")]
    Invalid,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Configuration for token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC secret used to sign and verify tokens.
    pub secret: String,
    /// Expected and emitted `iss` claim.
    pub issuer: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: TOKEN_ISSUER.to_string(),
        }
    }

    /// Load token configuration from the environment.
    ///
    /// | Env Var      | Required | Default                 |
    /// |--------------|----------|-------------------------|
    /// | `JWT_SECRET` | no       | [`DEFAULT_JWT_SECRET`]  |
    ///
    /// An unset or empty `JWT_SECRET` falls back to the default; check
    /// [`JwtConfig::is_default_secret`] and warn at startup.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());

        Self::new(secret)
    }

    /// Whether tokens are being signed with the insecure built-in secret.
    pub fn is_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Issue an HS256 token for the given user, valid for [`TOKEN_LIFETIME_HOURS`].
pub fn issue_token(
    user_id: DbId,
    username: &str,
    config: &JwtConfig,
) -> Result<String, TokenError> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        user_id,
        username: username.to_string(),
        iat: now,
        exp: now + TOKEN_LIFETIME_HOURS * 3600,
        iss: config.issuer.clone(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verify a token and return its [`Claims`].
///
/// Checks the algorithm family, signature, expiry (no leeway) and issuer.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
    validation.leeway = 0;
    validation.set_issuer(&[config.issuer.as_str()]);
    validation.set_required_spec_claims(&["exp", "iss"]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Token rejected");
        TokenError::Invalid
    })?;

    Ok(token_data.claims)
}

//! HS256 access/refresh token issuance and validation.
//!
//! Both tokens carry the same [`Claims`] and differ only in expiry, so an
//! access token is one whose lifetime (`exp - iat`) fits the access window.
//! Expiry is checked here rather than by `jsonwebtoken` so that no clock-skew
//! leeway is applied: a token is expired as soon as `exp` is before the
//! current time.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Default access token lifetime in hours.
pub const DEFAULT_ACCESS_EXPIRY_HOURS: i64 = 24;
/// Default refresh token lifetime in days.
pub const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;
/// Longest accepted access token lifetime (one year).
pub const MAX_ACCESS_EXPIRY_HOURS: i64 = 24 * 365;
/// Longest accepted refresh token lifetime.
pub const MAX_REFRESH_EXPIRY_DAYS: i64 = 365;

/// Identity claims embedded in every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// The user's document id.
    pub uid: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Bad signature, malformed token, or wrong algorithm.
    #[error("token is invalid")]
    Invalid,

    #[error("token has expired")]
    Expired,

    /// A refresh token presented where an access token is required.
    #[error("token is not an access token")]
    NotAccessToken,

    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Configuration for token issuance and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens. Never empty.
    pub secret: String,
    pub access_token_expiry_hours: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Build a config, refusing an empty secret and out-of-range lifetimes.
    ///
    /// The refresh window must be strictly longer than the access window.
    pub fn new(
        secret: impl Into<String>,
        access_token_expiry_hours: i64,
        refresh_token_expiry_days: i64,
    ) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::Missing("SECRET_KEY"));
        }
        if !(1..=MAX_ACCESS_EXPIRY_HOURS).contains(&access_token_expiry_hours) {
            return Err(ConfigError::Invalid {
                name: "JWT_ACCESS_EXPIRY_HOURS",
                value: access_token_expiry_hours.to_string(),
            });
        }
        if !(1..=MAX_REFRESH_EXPIRY_DAYS).contains(&refresh_token_expiry_days)
            || refresh_token_expiry_days * 24 <= access_token_expiry_hours
        {
            return Err(ConfigError::Invalid {
                name: "JWT_REFRESH_EXPIRY_DAYS",
                value: refresh_token_expiry_days.to_string(),
            });
        }
        Ok(Self {
            secret,
            access_token_expiry_hours,
            refresh_token_expiry_days,
        })
    }

    fn access_lifetime_secs(&self) -> i64 {
        Duration::hours(self.access_token_expiry_hours).num_seconds()
    }

    fn refresh_lifetime_secs(&self) -> i64 {
        Duration::days(self.refresh_token_expiry_days).num_seconds()
    }
}

/// An access token and its refresh token, issued together.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// Identity fields copied into the claims.
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub user_id: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

/// Issue an access/refresh pair for `subject`, valid from now.
pub fn issue_tokens(subject: TokenSubject<'_>, config: &JwtConfig) -> Result<TokenPair, TokenError> {
    issue_tokens_at(subject, config, Utc::now().timestamp())
}

/// Issue an access/refresh pair as if the current time were `now`.
pub fn issue_tokens_at(
    subject: TokenSubject<'_>,
    config: &JwtConfig,
    now: i64,
) -> Result<TokenPair, TokenError> {
    let access_exp = now + config.access_lifetime_secs();
    let refresh_exp = now + config.refresh_lifetime_secs();

    Ok(TokenPair {
        token: sign(&claims_for(subject, now, access_exp), config)?,
        refresh_token: sign(&claims_for(subject, now, refresh_exp), config)?,
    })
}

fn claims_for(subject: TokenSubject<'_>, iat: i64, exp: i64) -> Claims {
    Claims {
        email: subject.email.to_string(),
        first_name: subject.first_name.to_string(),
        last_name: subject.last_name.to_string(),
        uid: subject.user_id.to_string(),
        iat,
        exp,
    }
}

fn sign(claims: &Claims, config: &JwtConfig) -> Result<String, TokenError> {
    if config.secret.is_empty() {
        return Err(TokenError::Signing("signing key is empty".into()));
    }
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verify the signature and expiry of `token` against the current time.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    validate_token_at(token, config, Utc::now().timestamp())
}

/// Verify `token` as if the current time were `now`.
pub fn validate_token_at(token: &str, config: &JwtConfig, now: i64) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|_| TokenError::Invalid)?
    .claims;

    if claims.exp < now {
        return Err(TokenError::Expired);
    }
    Ok(claims)
}

/// Like [`validate_token`], but refuses refresh tokens.
pub fn validate_access_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    validate_access_token_at(token, config, Utc::now().timestamp())
}

pub fn validate_access_token_at(
    token: &str,
    config: &JwtConfig,
    now: i64,
) -> Result<Claims, TokenError> {
    let claims = validate_token_at(token, config, now)?;
    if claims.exp - claims.iat > config.access_lifetime_secs() {
        return Err(TokenError::NotAccessToken);
    }
    Ok(claims)
}

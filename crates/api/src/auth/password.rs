//! bcrypt password hashing and verification.
//!
//! The `_blocking` variants run on the blocking thread pool; call those from
//! handlers.
//!
//! bcrypt ignores everything past [`MAX_PASSWORD_BYTES`], so longer passwords
//! are never hashed and never match.

use bistro_core::validation::MAX_PASSWORD_BYTES;

/// Work factor for new hashes.
pub const DEFAULT_BCRYPT_COST: u32 = 14;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// The plaintext does not match the stored hash.
    #[error("invalid password")]
    Invalid,

    #[error("password exceeds {MAX_PASSWORD_BYTES} bytes")]
    TooLong,

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Hash a plaintext password with a random salt at the given cost.
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(PasswordError::TooLong);
    }
    Ok(bcrypt::hash(password, cost)?)
}

/// Check `password` against a stored bcrypt hash.
///
/// The comparison is constant-time inside `bcrypt`. A mismatch is
/// [`PasswordError::Invalid`]; a malformed hash is [`PasswordError::Hash`].
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(PasswordError::Invalid);
    }
    if bcrypt::verify(password, hash)? {
        Ok(())
    } else {
        Err(PasswordError::Invalid)
    }
}

pub async fn hash_password_blocking(password: String, cost: u32) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost)).await?
}

pub async fn verify_password_blocking(password: String, hash: String) -> Result<(), PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?
}

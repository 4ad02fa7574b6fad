//! Token persistence on the user record.
//!
//! The stored pair is the only server-side session state. Overwriting it is
//! last-write-wins; clearing it revokes refresh but not issued access tokens.

use bistro_db::models::user::User;
use bistro_db::repositories::user_repo::UserStore;
use bistro_db::StoreError;

use super::jwt::{issue_tokens, JwtConfig, TokenError, TokenPair, TokenSubject};

/// Issue a fresh pair for `user`.
pub fn tokens_for(user: &User, config: &JwtConfig) -> Result<TokenPair, TokenError> {
    issue_tokens(
        TokenSubject {
            user_id: &user.id,
            email: &user.email,
            first_name: &user.first_name,
            last_name: &user.last_name,
        },
        config,
    )
}

/// Overwrite the stored pair. Returns `false` if the user does not exist.
pub async fn persist_tokens(
    users: &dyn UserStore,
    user_id: &str,
    pair: &TokenPair,
) -> Result<bool, StoreError> {
    users
        .update_tokens(user_id, &pair.token, &pair.refresh_token)
        .await
}

/// Blank both stored tokens (logout).
pub async fn clear_tokens(users: &dyn UserStore, user_id: &str) -> Result<bool, StoreError> {
    users.update_tokens(user_id, "", "").await
}

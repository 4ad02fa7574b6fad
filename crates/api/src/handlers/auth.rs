//! Handlers for registration, login, logout, token refresh and password reset.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bistro_core::error::CoreError;
use bistro_core::roles::Role;
use bistro_core::validation::{
    validate_email, validate_name, validate_password, validate_phone,
};
use bistro_db::models::user::{CreateUser, User, UserResponse};
use bistro_db::StoreError;
use chrono::Utc;
use serde::Deserialize;

use crate::auth::jwt::{validate_token, TokenError};
use crate::auth::password::{hash_password_blocking, verify_password_blocking, PasswordError};
use crate::auth::session::{clear_tokens, persist_tokens, tokens_for};
use crate::error::{AppError, AppResult};
use crate::json::AppJson;
use crate::middleware::auth::INVALID_TOKEN;
use crate::response::{AuthResponse, MessageResponse};
use crate::state::AppState;

/// Shared by unknown e-mail and wrong password so neither is distinguishable.
pub const INVALID_CREDENTIALS: &str = "invalid email or password";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub old_password: String,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn token_failure(err: TokenError) -> AppError {
    AppError::InternalError(format!("Token issuance failed: {err}"))
}

/// Mismatch is a 401 with the generic message; anything else is a 500.
fn credential_failure(err: PasswordError) -> AppError {
    match err {
        PasswordError::Invalid => AppError::unauthorized(INVALID_CREDENTIALS),
        other => AppError::InternalError(format!("Password verification failed: {other}")),
    }
}

/// Map a unique-index violation on `users` to a 409.
pub(crate) fn duplicate_account(err: StoreError) -> AppError {
    match err {
        StoreError::Duplicate(_) => AppError::Core(CoreError::Conflict(
            "a user with this email or phone already exists".into(),
        )),
        other => other.into(),
    }
}

/// Validate `input` and build an unsaved account with a hashed password and
/// no tokens.
pub(crate) async fn new_account(state: &AppState, input: CreateUser, role: Role) -> AppResult<User> {
    validate_name("first_name", &input.first_name)?;
    validate_name("last_name", &input.last_name)?;
    validate_email(&input.email)?;
    validate_phone(&input.phone)?;
    validate_password(&input.password)?;

    let password_hash = hash_password_blocking(input.password, state.config.bcrypt_cost)
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let now = Utc::now();
    Ok(User {
        id: bistro_db::new_id(),
        first_name: input.first_name.trim().to_string(),
        last_name: input.last_name.trim().to_string(),
        email: input.email,
        password_hash,
        phone: input.phone,
        avatar: input.avatar,
        role,
        token: String::new(),
        refresh_token: String::new(),
        created_at: now,
        updated_at: now,
    })
}

/// Look up `email` and check `password` against the stored hash.
async fn authenticate(state: &AppState, email: &str, password: &str) -> AppResult<User> {
    let user = state
        .stores
        .users
        .find_by_email(email)
        .await?
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    verify_password_blocking(password.to_string(), user.password_hash.clone())
        .await
        .map_err(credential_failure)?;
    Ok(user)
}

/// Issue a pair for `user`, persist it, and build the response body.
async fn start_session(state: &AppState, mut user: User) -> AppResult<AuthResponse> {
    let pair = tokens_for(&user, &state.config.jwt).map_err(token_failure)?;
    if !persist_tokens(state.stores.users.as_ref(), &user.id, &pair).await? {
        return Err(AppError::unauthorized(INVALID_TOKEN));
    }
    user.token = pair.token.clone();
    user.refresh_token = pair.refresh_token.clone();

    Ok(AuthResponse {
        data: UserResponse::from(user),
        token: pair.token,
        refresh_token: pair.refresh_token,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /register
///
/// Creates a `User`-role account and returns it with a fresh token pair.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateUser>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let mut user = new_account(&state, input, Role::User).await?;

    let pair = tokens_for(&user, &state.config.jwt).map_err(token_failure)?;
    user.token = pair.token.clone();
    user.refresh_token = pair.refresh_token.clone();

    state.stores.users.create(&user).await.map_err(duplicate_account)?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            data: UserResponse::from(user),
            token: pair.token,
            refresh_token: pair.refresh_token,
        }),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::validation("email and password are required"));
    }

    let user = authenticate(&state, &input.email, &input.password).await?;
    let response = start_session(&state, user).await?;

    tracing::info!(user_id = %response.data.id, "User logged in");
    Ok(Json(response))
}

/// POST /logout
///
/// Blanks the stored token pair. Already-issued access tokens stay valid
/// until they expire; the refresh token can no longer be exchanged.
pub async fn logout(
    State(state): State<AppState>,
    AppJson(input): AppJson<LogoutRequest>,
) -> AppResult<Json<MessageResponse>> {
    if !clear_tokens(state.stores.users.as_ref(), &input.user_id).await? {
        return Err(AppError::Core(CoreError::not_found("User", &input.user_id)));
    }
    tracing::info!(user_id = %input.user_id, "User logged out");
    Ok(Json(MessageResponse::new("logged out")))
}

/// POST /refresh
///
/// Exchanges the refresh token currently stored on the user record for a new
/// pair. A token that verifies but is no longer the stored one is rejected.
pub async fn refresh(
    State(state): State<AppState>,
    AppJson(input): AppJson<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let claims = validate_token(&input.refresh_token, &state.config.jwt).map_err(|e| {
        tracing::debug!(error = %e, "Rejected refresh token");
        AppError::unauthorized(INVALID_TOKEN)
    })?;

    let user = state
        .stores
        .users
        .find_by_id(&claims.uid)
        .await?
        .filter(|u| !u.refresh_token.is_empty() && u.refresh_token == input.refresh_token)
        .ok_or_else(|| AppError::unauthorized(INVALID_TOKEN))?;

    let response = start_session(&state, user).await?;
    tracing::info!(user_id = %response.data.id, "Tokens refreshed");
    Ok(Json(response))
}

/// POST /reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    AppJson(input): AppJson<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_password(&input.new_password)?;

    let user = authenticate(&state, &input.email, &input.old_password).await?;

    let password_hash = hash_password_blocking(input.new_password, state.config.bcrypt_cost)
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    if !state
        .stores
        .users
        .update_password(&user.id, &password_hash)
        .await?
    {
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    tracing::info!(user_id = %user.id, "Password reset");
    Ok(Json(MessageResponse::new("password updated")))
}

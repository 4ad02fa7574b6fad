//! The authorization gate.
//!
//! Every protected route is wrapped in [`require_token`]. It never touches a
//! store: a request with a missing or invalid token is rejected before any
//! handler (and therefore any store call) runs.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::jwt::{validate_access_token, Claims};
use crate::error::AppError;
use crate::state::AppState;

pub const NO_AUTHORIZATION: &str = "no authorization provided";
pub const INVALID_TOKEN: &str = "invalid token";

/// Identity attached to the request by [`require_token`].
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.uid,
            email: claims.email,
            first_name: claims.first_name,
            last_name: claims.last_name,
        }
    }
}

/// Pull the token out of an `Authorization` value. The bare token is the
/// expected form; a `Bearer ` prefix is tolerated.
fn token_from_header(value: &str) -> Option<&str> {
    let value = value.trim();
    let token = match value.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => value,
    };
    (!token.is_empty()).then_some(token)
}

/// Gate middleware for protected routes.
///
/// Expired, malformed and refresh tokens all get the same response.
pub async fn require_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_header);

    let Some(token) = token else {
        tracing::debug!(path = %req.uri().path(), "Rejected request without authorization");
        return Err(AppError::unauthorized(NO_AUTHORIZATION));
    };

    let claims = validate_access_token(token, &state.config.jwt).map_err(|e| {
        tracing::debug!(error = %e, path = %req.uri().path(), "Rejected request with bad token");
        AppError::unauthorized(INVALID_TOKEN)
    })?;

    req.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(req).await)
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(NO_AUTHORIZATION))
    }
}

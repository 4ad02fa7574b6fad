//! Role checks.
//!
//! Roles are not in the token; every check is a live lookup of the caller's
//! user record, so a promotion or demotion takes effect on the next request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use bistro_db::repositories::user_repo::UserStore;

use super::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub const ADMIN_REQUIRED: &str = "admin access required";

/// True iff the user with `email` exists and has the `Admin` role.
///
/// Fails closed: a missing user or a store error is `false`, never an error.
pub async fn is_admin(users: &dyn UserStore, email: &str) -> bool {
    admin_by_email(users, email, None).await
}

/// [`is_admin`] for an authenticated caller.
///
/// Emails can change, so the record found by the token's email must also be
/// the caller's own. A stale token whose email now belongs to someone else
/// gets no role.
pub async fn caller_is_admin(users: &dyn UserStore, caller: &AuthUser) -> bool {
    admin_by_email(users, &caller.email, Some(&caller.user_id)).await
}

async fn admin_by_email(users: &dyn UserStore, email: &str, owner_id: Option<&str>) -> bool {
    match users.find_by_email(email).await {
        Ok(Some(user)) => owner_id.map_or(true, |id| user.id == id) && user.role.is_admin(),
        Ok(None) => false,
        Err(e) => {
            tracing::warn!(error = %e, "Role lookup failed, denying admin access");
            false
        }
    }
}

/// Allow the caller to act on their own record, or any record if admin.
pub async fn ensure_self_or_admin(state: &AppState, user: &AuthUser, target_id: &str) -> AppResult<()> {
    if user.user_id == target_id || caller_is_admin(state.stores.users.as_ref(), user).await {
        return Ok(());
    }
    Err(AppError::unauthorized(ADMIN_REQUIRED))
}

/// Requires the `Admin` role. Rejects with 401 otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is an admin at the time of this request
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !caller_is_admin(state.stores.users.as_ref(), &user).await {
            tracing::debug!(user_id = %user.user_id, "Rejected non-admin caller");
            return Err(AppError::unauthorized(ADMIN_REQUIRED));
        }
        Ok(RequireAdmin(user))
    }
}

//! Handlers for the `/users` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bistro_core::error::CoreError;
use bistro_core::roles::Role;
use bistro_core::validation::{validate_email, validate_name, validate_phone};
use bistro_db::models::user::{CreateUser, UpdateUser, UserResponse};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::auth::{duplicate_account, new_account};
use crate::json::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{ensure_self_or_admin, RequireAdmin};
use crate::query::PaginationParams;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// Account created by an admin. The role defaults to `User`.
#[derive(Debug, Deserialize)]
pub struct AdminCreateUser {
    #[serde(flatten)]
    pub account: CreateUser,
    #[serde(default)]
    pub role: Role,
}

fn user_not_found(id: &str) -> AppError {
    AppError::Core(CoreError::not_found("User", id))
}

/// GET /users
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<UserResponse>>> {
    let page = params.page();
    let users = state.stores.users.list(page).await?;
    let users = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(PagedResponse::new(users, page)))
}

/// POST /users
///
/// No tokens are issued; the new user logs in to get them.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<AdminCreateUser>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let user = new_account(&state, input.account, input.role).await?;
    state.stores.users.create(&user).await.map_err(duplicate_account)?;

    tracing::info!(user_id = %user.id, role = %user.role, by = %admin.user_id, "User created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: user.into() })))
}

/// GET /users/{id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    ensure_self_or_admin(&state, &user, &id).await?;
    let found = state
        .stores
        .users
        .find_by_id(&id)
        .await?
        .ok_or_else(|| user_not_found(&id))?;
    Ok(Json(DataResponse {
        data: found.into(),
    }))
}

/// PUT /users/{id}
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateUser>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    ensure_self_or_admin(&state, &user, &id).await?;

    if let Some(v) = &input.first_name {
        validate_name("first_name", v)?;
    }
    if let Some(v) = &input.last_name {
        validate_name("last_name", v)?;
    }
    if let Some(v) = &input.email {
        validate_email(v)?;
    }
    if let Some(v) = &input.phone {
        validate_phone(v)?;
    }

    let updated = state
        .stores
        .users
        .update_profile(&id, &input)
        .await
        .map_err(duplicate_account)?
        .ok_or_else(|| user_not_found(&id))?;

    tracing::info!(user_id = %id, by = %user.user_id, "User profile updated");
    Ok(Json(DataResponse {
        data: updated.into(),
    }))
}

/// PUT /users/{id}/role
pub async fn update_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateRoleRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let updated = state
        .stores
        .users
        .update_role(&id, input.role)
        .await?
        .ok_or_else(|| user_not_found(&id))?;

    tracing::info!(user_id = %id, role = %input.role, by = %admin.user_id, "User role changed");
    Ok(Json(DataResponse {
        data: updated.into(),
    }))
}

/// DELETE /users/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !state.stores.users.delete(&id).await? {
        return Err(user_not_found(&id));
    }
    tracing::info!(user_id = %id, by = %admin.user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

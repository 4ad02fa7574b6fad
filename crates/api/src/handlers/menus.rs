//! Handlers for the `/menus` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bistro_core::validation::{validate_date_range, validate_name};
use bistro_db::models::menu::{CreateMenu, Menu, UpdateMenu};
use chrono::Utc;

use super::{find_or_404, not_found};
use crate::error::AppResult;
use crate::json::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// GET /menus
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<Menu>>> {
    let page = params.page();
    let menus = state.stores.menus.list(None, page).await?;
    Ok(Json(PagedResponse::new(menus, page)))
}

/// GET /menus/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Menu>>> {
    let menu = find_or_404(state.stores.menus.as_ref(), &id).await?;
    Ok(Json(DataResponse { data: menu }))
}

/// POST /menus
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateMenu>,
) -> AppResult<(StatusCode, Json<DataResponse<Menu>>)> {
    validate_name("name", &input.name)?;
    validate_date_range(input.start_date, input.end_date)?;

    let now = Utc::now();
    let menu = Menu {
        id: bistro_db::new_id(),
        name: input.name.trim().to_string(),
        description: input.description,
        start_date: input.start_date,
        end_date: input.end_date,
        created_at: now,
        updated_at: now,
    };
    state.stores.menus.insert(&menu).await?;
    tracing::info!(menu_id = %menu.id, "Menu created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: menu })))
}

/// PUT /menus/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateMenu>,
) -> AppResult<Json<DataResponse<Menu>>> {
    let mut menu = find_or_404(state.stores.menus.as_ref(), &id).await?;

    if let Some(v) = input.name {
        validate_name("name", &v)?;
        menu.name = v.trim().to_string();
    }
    if let Some(v) = input.description {
        menu.description = v;
    }
    if input.start_date.is_some() {
        menu.start_date = input.start_date;
    }
    if input.end_date.is_some() {
        menu.end_date = input.end_date;
    }
    validate_date_range(menu.start_date, menu.end_date)?;
    menu.updated_at = Utc::now();

    if !state.stores.menus.replace(&menu).await? {
        return Err(not_found::<Menu>(&id));
    }
    Ok(Json(DataResponse { data: menu }))
}

/// DELETE /menus/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !state.stores.menus.delete(&id).await? {
        return Err(not_found::<Menu>(&id));
    }
    tracing::info!(menu_id = %id, "Menu deleted");
    Ok(StatusCode::NO_CONTENT)
}

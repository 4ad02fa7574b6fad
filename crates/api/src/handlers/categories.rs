//! Handlers for the `/categories` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bistro_core::validation::validate_name;
use bistro_db::models::category::{Category, CreateCategory, UpdateCategory};
use chrono::Utc;

use super::{find_or_404, not_found};
use crate::error::AppResult;
use crate::json::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// GET /categories
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<Category>>> {
    let page = params.page();
    let categories = state.stores.categories.list(None, page).await?;
    Ok(Json(PagedResponse::new(categories, page)))
}

/// GET /categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Category>>> {
    let category = find_or_404(state.stores.categories.as_ref(), &id).await?;
    Ok(Json(DataResponse { data: category }))
}

/// POST /categories
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    validate_name("title", &input.title)?;

    let now = Utc::now();
    let category = Category {
        id: bistro_db::new_id(),
        title: input.title.trim().to_string(),
        image: input.image,
        created_at: now,
        updated_at: now,
    };
    state.stores.categories.insert(&category).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /categories/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    let mut category = find_or_404(state.stores.categories.as_ref(), &id).await?;

    if let Some(v) = input.title {
        validate_name("title", &v)?;
        category.title = v.trim().to_string();
    }
    if input.image.is_some() {
        category.image = input.image;
    }
    category.updated_at = Utc::now();

    if !state.stores.categories.replace(&category).await? {
        return Err(not_found::<Category>(&id));
    }
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /categories/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !state.stores.categories.delete(&id).await? {
        return Err(not_found::<Category>(&id));
    }
    Ok(StatusCode::NO_CONTENT)
}

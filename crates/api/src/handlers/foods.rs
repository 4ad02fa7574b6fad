//! Handlers for the `/foods` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bistro_core::orders::round_currency;
use bistro_core::validation::{validate_name, validate_price};
use bistro_db::models::food::{CreateFood, Food, UpdateFood};
use bistro_db::models::menu::Menu;
use chrono::Utc;

use super::{find_or_404, not_found, require_reference};
use crate::error::AppResult;
use crate::json::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::query::FoodListParams;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// GET /foods
///
/// `?menu_id=` narrows the listing to one menu.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<FoodListParams>,
) -> AppResult<Json<PagedResponse<Food>>> {
    let page = params.page();
    let filter = params.menu_id.as_deref().map(|menu_id| ("menu_id", menu_id));
    let foods = state.stores.foods.list(filter, page).await?;
    Ok(Json(PagedResponse::new(foods, page)))
}

/// GET /foods/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Food>>> {
    let food = find_or_404(state.stores.foods.as_ref(), &id).await?;
    Ok(Json(DataResponse { data: food }))
}

/// POST /foods
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateFood>,
) -> AppResult<(StatusCode, Json<DataResponse<Food>>)> {
    validate_name("name", &input.name)?;
    validate_price(input.price)?;
    require_reference::<Menu>(state.stores.menus.as_ref(), "menu_id", &input.menu_id).await?;

    let now = Utc::now();
    let food = Food {
        id: bistro_db::new_id(),
        name: input.name.trim().to_string(),
        description: input.description,
        price: round_currency(input.price),
        food_image: input.food_image,
        menu_id: input.menu_id,
        created_at: now,
        updated_at: now,
    };
    state.stores.foods.insert(&food).await?;
    tracing::info!(food_id = %food.id, menu_id = %food.menu_id, "Food created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: food })))
}

/// PUT /foods/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateFood>,
) -> AppResult<Json<DataResponse<Food>>> {
    let mut food = find_or_404(state.stores.foods.as_ref(), &id).await?;

    if let Some(v) = input.name {
        validate_name("name", &v)?;
        food.name = v.trim().to_string();
    }
    if let Some(v) = input.description {
        food.description = v;
    }
    if let Some(v) = input.price {
        validate_price(v)?;
        food.price = round_currency(v);
    }
    if let Some(v) = input.food_image {
        food.food_image = v;
    }
    if let Some(v) = input.menu_id {
        require_reference::<Menu>(state.stores.menus.as_ref(), "menu_id", &v).await?;
        food.menu_id = v;
    }
    food.updated_at = Utc::now();

    if !state.stores.foods.replace(&food).await? {
        return Err(not_found::<Food>(&id));
    }
    Ok(Json(DataResponse { data: food }))
}

/// DELETE /foods/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !state.stores.foods.delete(&id).await? {
        return Err(not_found::<Food>(&id));
    }
    tracing::info!(food_id = %id, "Food deleted");
    Ok(StatusCode::NO_CONTENT)
}

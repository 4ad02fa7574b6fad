//! Handlers for the `/restaurants` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bistro_core::validation::{validate_name, validate_rating, validate_rating_count};
use bistro_db::models::menu::Menu;
use bistro_db::models::restaurant::{CreateRestaurant, Restaurant, UpdateRestaurant};
use chrono::Utc;

use super::{find_or_404, not_found, require_reference};
use crate::error::AppResult;
use crate::json::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

fn validate(restaurant: &Restaurant) -> AppResult<()> {
    validate_name("title", &restaurant.title)?;
    validate_rating(restaurant.rating)?;
    validate_rating_count(restaurant.rating_count)?;
    Ok(())
}

async fn check_menus(state: &AppState, menu_ids: &[String]) -> AppResult<()> {
    for menu_id in menu_ids {
        require_reference::<Menu>(state.stores.menus.as_ref(), "menu_id", menu_id).await?;
    }
    Ok(())
}

/// GET /restaurants
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<Restaurant>>> {
    let page = params.page();
    let restaurants = state.stores.restaurants.list(None, page).await?;
    Ok(Json(PagedResponse::new(restaurants, page)))
}

/// GET /restaurants/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Restaurant>>> {
    let restaurant = find_or_404(state.stores.restaurants.as_ref(), &id).await?;
    Ok(Json(DataResponse { data: restaurant }))
}

/// GET /restaurants/{id}/menus
pub async fn menus(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<Menu>>>> {
    let restaurant = find_or_404(state.stores.restaurants.as_ref(), &id).await?;
    let menus = state.stores.menus.find_by_ids(&restaurant.menu_ids).await?;
    Ok(Json(DataResponse { data: menus }))
}

/// POST /restaurants
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateRestaurant>,
) -> AppResult<(StatusCode, Json<DataResponse<Restaurant>>)> {
    let now = Utc::now();
    let restaurant = Restaurant {
        id: bistro_db::new_id(),
        title: input.title.trim().to_string(),
        image: input.image,
        time: input.time,
        pickup: input.pickup,
        delivery: input.delivery,
        rating: input.rating,
        rating_count: input.rating_count,
        menu_ids: input.menu_ids,
        created_at: now,
        updated_at: now,
    };
    validate(&restaurant)?;
    check_menus(&state, &restaurant.menu_ids).await?;

    state.stores.restaurants.insert(&restaurant).await?;
    tracing::info!(restaurant_id = %restaurant.id, "Restaurant created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: restaurant })))
}

/// PUT /restaurants/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateRestaurant>,
) -> AppResult<Json<DataResponse<Restaurant>>> {
    let mut restaurant = find_or_404(state.stores.restaurants.as_ref(), &id).await?;

    if let Some(v) = input.title {
        restaurant.title = v.trim().to_string();
    }
    if let Some(v) = input.image {
        restaurant.image = v;
    }
    if let Some(v) = input.time {
        restaurant.time = v;
    }
    if let Some(v) = input.pickup {
        restaurant.pickup = v;
    }
    if let Some(v) = input.delivery {
        restaurant.delivery = v;
    }
    if let Some(v) = input.rating {
        restaurant.rating = v;
    }
    if let Some(v) = input.rating_count {
        restaurant.rating_count = v;
    }
    if let Some(v) = input.menu_ids {
        check_menus(&state, &v).await?;
        restaurant.menu_ids = v;
    }
    validate(&restaurant)?;
    restaurant.updated_at = Utc::now();

    if !state.stores.restaurants.replace(&restaurant).await? {
        return Err(not_found::<Restaurant>(&id));
    }
    Ok(Json(DataResponse { data: restaurant }))
}

/// DELETE /restaurants/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !state.stores.restaurants.delete(&id).await? {
        return Err(not_found::<Restaurant>(&id));
    }
    tracing::info!(restaurant_id = %id, "Restaurant deleted");
    Ok(StatusCode::NO_CONTENT)
}

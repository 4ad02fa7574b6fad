//! Handlers for the `/order-items` resource.
//!
//! Every write here keeps the parent order's `total_amount` equal to the sum
//! of its items' totals.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bistro_core::orders::{line_total, order_total, round_currency, OrderSummary};
use bistro_core::validation::validate_quantity;
use bistro_db::models::food::Food;
use bistro_db::models::order::Order;
use bistro_db::models::order_item::{CreateOrderItems, OrderItem, UpdateOrderItem};
use bistro_db::models::table::Table;
use chrono::Utc;
use serde::Serialize;

use super::orders::new_order;
use super::{find_or_404, not_found, require_reference};
use crate::error::{AppError, AppResult};
use crate::json::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedOrderItems {
    pub order: Order,
    pub order_items: Vec<OrderItem>,
}

/// Recompute an order's total from its stored items.
async fn sync_order_total(state: &AppState, order_id: &str) -> AppResult<()> {
    let Some(mut order) = state.stores.orders.find_by_id(order_id).await? else {
        tracing::warn!(order_id, "Order item points at a missing order");
        return Ok(());
    };
    let items = state.stores.order_items.find_by_field("order_id", order_id).await?;
    order.total_amount = order_total(items.iter().map(|i| i.total_amount));
    order.updated_at = Utc::now();
    state.stores.orders.replace(&order).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /order-items
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<OrderItem>>> {
    let page = params.page();
    let items = state.stores.order_items.list(None, page).await?;
    Ok(Json(PagedResponse::new(items, page)))
}

/// GET /order-items/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<OrderItem>>> {
    let item = find_or_404(state.stores.order_items.as_ref(), &id).await?;
    Ok(Json(DataResponse { data: item }))
}

/// GET /order-items/order/{order_id}
///
/// The order's items joined with their foods and the order's table.
pub async fn by_order(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<DataResponse<OrderSummary>>> {
    let summary = state
        .stores
        .order_summaries
        .summarize(&order_id)
        .await?
        .ok_or_else(|| not_found::<Order>(&order_id))?;
    Ok(Json(DataResponse { data: summary }))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /order-items
///
/// Opens a new order on the table and adds every line to it. All lines are
/// checked before anything is written.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateOrderItems>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedOrderItems>>)> {
    require_reference::<Table>(state.stores.tables.as_ref(), "table_id", &input.table_id).await?;
    if input.order_items.is_empty() {
        return Err(AppError::validation("order_items must not be empty"));
    }

    let mut order = new_order(input.table_id, None);
    let now = order.created_at;

    let mut items = Vec::with_capacity(input.order_items.len());
    for line in input.order_items {
        validate_quantity(line.quantity)?;
        let food =
            require_reference::<Food>(state.stores.foods.as_ref(), "food_id", &line.food_id).await?;
        let unit_price = round_currency(food.price);
        items.push(OrderItem {
            id: bistro_db::new_id(),
            order_id: order.id.clone(),
            food_id: food.id,
            quantity: line.quantity,
            unit_price,
            total_amount: line_total(unit_price, line.quantity),
            created_at: now,
            updated_at: now,
        });
    }
    order.total_amount = order_total(items.iter().map(|i| i.total_amount));

    state.stores.orders.insert(&order).await?;
    for item in &items {
        state.stores.order_items.insert(item).await?;
    }

    tracing::info!(
        order_id = %order.id,
        user_id = %user.user_id,
        items = items.len(),
        total = order.total_amount,
        "Order items created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedOrderItems {
                order,
                order_items: items,
            },
        }),
    ))
}

/// PUT /order-items/{id}
///
/// Changing the food re-copies its current price.
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateOrderItem>,
) -> AppResult<Json<DataResponse<OrderItem>>> {
    let mut item = find_or_404(state.stores.order_items.as_ref(), &id).await?;

    if let Some(food_id) = input.food_id {
        let food = require_reference::<Food>(state.stores.foods.as_ref(), "food_id", &food_id).await?;
        item.food_id = food.id;
        item.unit_price = round_currency(food.price);
    }
    if let Some(quantity) = input.quantity {
        validate_quantity(quantity)?;
        item.quantity = quantity;
    }
    item.total_amount = line_total(item.unit_price, item.quantity);
    item.updated_at = Utc::now();

    if !state.stores.order_items.replace(&item).await? {
        return Err(not_found::<OrderItem>(&id));
    }
    sync_order_total(&state, &item.order_id).await?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /order-items/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let item = find_or_404(state.stores.order_items.as_ref(), &id).await?;
    if !state.stores.order_items.delete(&id).await? {
        return Err(not_found::<OrderItem>(&id));
    }
    sync_order_total(&state, &item.order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for the `/orders` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bistro_db::models::order::{CreateOrder, Order, UpdateOrder, DEFAULT_ORDER_STATUS};
use bistro_db::models::table::Table;
use chrono::Utc;

use super::{find_or_404, not_found, require_reference};
use crate::error::AppResult;
use crate::json::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// GET /orders
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<Order>>> {
    let page = params.page();
    let orders = state.stores.orders.list(None, page).await?;
    Ok(Json(PagedResponse::new(orders, page)))
}

/// GET /orders/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Order>>> {
    let order = find_or_404(state.stores.orders.as_ref(), &id).await?;
    Ok(Json(DataResponse { data: order }))
}

/// Build a fresh, empty order on `table_id`.
pub(crate) fn new_order(table_id: String, order_status: Option<String>) -> Order {
    let now = Utc::now();
    Order {
        id: bistro_db::new_id(),
        table_id,
        order_status: order_status
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ORDER_STATUS.to_string()),
        order_date: now,
        total_amount: 0.0,
        created_at: now,
        updated_at: now,
    }
}

/// POST /orders
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateOrder>,
) -> AppResult<(StatusCode, Json<DataResponse<Order>>)> {
    require_reference::<Table>(state.stores.tables.as_ref(), "table_id", &input.table_id).await?;

    let order = new_order(input.table_id, input.order_status);
    state.stores.orders.insert(&order).await?;
    tracing::info!(order_id = %order.id, user_id = %user.user_id, "Order created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// PUT /orders/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateOrder>,
) -> AppResult<Json<DataResponse<Order>>> {
    let mut order = find_or_404(state.stores.orders.as_ref(), &id).await?;

    if let Some(v) = input.table_id {
        require_reference::<Table>(state.stores.tables.as_ref(), "table_id", &v).await?;
        order.table_id = v;
    }
    if let Some(v) = input.order_status.filter(|s| !s.trim().is_empty()) {
        order.order_status = v;
    }
    order.updated_at = Utc::now();

    if !state.stores.orders.replace(&order).await? {
        return Err(not_found::<Order>(&id));
    }
    Ok(Json(DataResponse { data: order }))
}

/// DELETE /orders/{id}
///
/// Removes the order's items along with it.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !state.stores.orders.delete(&id).await? {
        return Err(not_found::<Order>(&id));
    }
    let removed = state.stores.order_items.delete_by_field("order_id", &id).await?;
    tracing::info!(order_id = %id, removed_items = removed, "Order deleted");
    Ok(StatusCode::NO_CONTENT)
}

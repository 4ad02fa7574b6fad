//! Handlers for the `/invoices` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bistro_core::billing::PaymentStatus;
use bistro_core::orders::round_currency;
use bistro_db::models::invoice::{CreateInvoice, Invoice, UpdateInvoice};
use bistro_db::models::order::Order;
use chrono::Utc;

use super::{find_or_404, not_found, require_reference};
use crate::error::AppResult;
use crate::json::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// GET /invoices
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<Invoice>>> {
    let page = params.page();
    let invoices = state.stores.invoices.list(None, page).await?;
    Ok(Json(PagedResponse::new(invoices, page)))
}

/// GET /invoices/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Invoice>>> {
    let invoice = find_or_404(state.stores.invoices.as_ref(), &id).await?;
    Ok(Json(DataResponse { data: invoice }))
}

/// POST /invoices
///
/// The amount is taken from the order; the invoice starts `PENDING`.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateInvoice>,
) -> AppResult<(StatusCode, Json<DataResponse<Invoice>>)> {
    let order =
        require_reference::<Order>(state.stores.orders.as_ref(), "order_id", &input.order_id).await?;

    let now = Utc::now();
    let invoice = Invoice {
        id: bistro_db::new_id(),
        order_id: order.id,
        payment_method: input.payment_method,
        payment_status: PaymentStatus::Pending,
        payment_due_date: input.payment_due_date.unwrap_or(now),
        total_amount: round_currency(order.total_amount),
        created_at: now,
        updated_at: now,
    };
    state.stores.invoices.insert(&invoice).await?;
    tracing::info!(
        invoice_id = %invoice.id,
        order_id = %invoice.order_id,
        user_id = %user.user_id,
        "Invoice created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: invoice })))
}

/// PUT /invoices/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateInvoice>,
) -> AppResult<Json<DataResponse<Invoice>>> {
    let mut invoice = find_or_404(state.stores.invoices.as_ref(), &id).await?;

    if let Some(v) = input.payment_method {
        invoice.payment_method = v;
    }
    if let Some(v) = input.payment_status {
        invoice.payment_status = v;
    }
    if let Some(v) = input.payment_due_date {
        invoice.payment_due_date = v;
    }
    // The order may have changed since the invoice was raised.
    let order =
        require_reference::<Order>(state.stores.orders.as_ref(), "order_id", &invoice.order_id)
            .await?;
    invoice.total_amount = round_currency(order.total_amount);
    invoice.updated_at = Utc::now();

    if !state.stores.invoices.replace(&invoice).await? {
        return Err(not_found::<Invoice>(&id));
    }
    Ok(Json(DataResponse { data: invoice }))
}

/// DELETE /invoices/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !state.stores.invoices.delete(&id).await? {
        return Err(not_found::<Invoice>(&id));
    }
    Ok(StatusCode::NO_CONTENT)
}

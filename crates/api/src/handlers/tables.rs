//! Handlers for the `/tables` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bistro_core::validation::{validate_guests, validate_table_number};
use bistro_db::models::table::{CreateTable, Table, UpdateTable, DEFAULT_TABLE_STATUS};
use chrono::Utc;

use super::{find_or_404, not_found};
use crate::error::AppResult;
use crate::json::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// GET /tables
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<Table>>> {
    let page = params.page();
    let tables = state.stores.tables.list(None, page).await?;
    Ok(Json(PagedResponse::new(tables, page)))
}

/// GET /tables/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Table>>> {
    let table = find_or_404(state.stores.tables.as_ref(), &id).await?;
    Ok(Json(DataResponse { data: table }))
}

/// POST /tables
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTable>,
) -> AppResult<(StatusCode, Json<DataResponse<Table>>)> {
    validate_table_number(input.table_number)?;
    validate_guests(input.number_of_guests)?;

    let now = Utc::now();
    let table = Table {
        id: bistro_db::new_id(),
        table_number: input.table_number,
        number_of_guests: input.number_of_guests,
        table_status: input
            .table_status
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE_STATUS.to_string()),
        created_at: now,
        updated_at: now,
    };
    state.stores.tables.insert(&table).await?;
    tracing::info!(table_id = %table.id, table_number = table.table_number, "Table created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: table })))
}

/// PUT /tables/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateTable>,
) -> AppResult<Json<DataResponse<Table>>> {
    let mut table = find_or_404(state.stores.tables.as_ref(), &id).await?;

    if let Some(v) = input.table_number {
        validate_table_number(v)?;
        table.table_number = v;
    }
    if let Some(v) = input.number_of_guests {
        validate_guests(v)?;
        table.number_of_guests = v;
    }
    if let Some(v) = input.table_status {
        table.table_status = v;
    }
    table.updated_at = Utc::now();

    if !state.stores.tables.replace(&table).await? {
        return Err(not_found::<Table>(&id));
    }
    Ok(Json(DataResponse { data: table }))
}

/// DELETE /tables/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !state.stores.tables.delete(&id).await? {
        return Err(not_found::<Table>(&id));
    }
    Ok(StatusCode::NO_CONTENT)
}

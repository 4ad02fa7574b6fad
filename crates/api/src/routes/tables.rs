use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::tables;
use crate::state::AppState;

/// Read-only Table routes.
///
/// ```text
/// GET /tables        -> list
/// GET /tables/{id}   -> get_by_id
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/tables", get(tables::list))
        .route("/tables/{id}", get(tables::get_by_id))
}

/// Table writes (admin only).
///
/// ```text
/// POST   /tables        -> create
/// PUT    /tables/{id}   -> update
/// DELETE /tables/{id}   -> delete
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/tables", post(tables::create))
        .route("/tables/{id}", put(tables::update).delete(tables::delete))
}

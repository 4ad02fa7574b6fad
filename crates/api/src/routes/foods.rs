use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::foods;
use crate::state::AppState;

/// Read-only Food routes.
///
/// ```text
/// GET /foods        -> list
/// GET /foods/{id}   -> get_by_id
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/foods", get(foods::list))
        .route("/foods/{id}", get(foods::get_by_id))
}

/// Food writes (admin only).
///
/// ```text
/// POST   /foods        -> create
/// PUT    /foods/{id}   -> update
/// DELETE /foods/{id}   -> delete
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/foods", post(foods::create))
        .route("/foods/{id}", put(foods::update).delete(foods::delete))
}

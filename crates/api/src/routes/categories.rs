use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Read-only Category routes.
///
/// ```text
/// GET /categories        -> list
/// GET /categories/{id}   -> get_by_id
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories::list))
        .route("/categories/{id}", get(categories::get_by_id))
}

/// Category writes (admin only).
///
/// ```text
/// POST   /categories        -> create
/// PUT    /categories/{id}   -> update
/// DELETE /categories/{id}   -> delete
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/categories", post(categories::create))
        .route("/categories/{id}", put(categories::update).delete(categories::delete))
}

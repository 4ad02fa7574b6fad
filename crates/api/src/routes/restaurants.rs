use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::restaurants;
use crate::state::AppState;

/// Read-only restaurant routes.
///
/// ```text
/// GET /restaurants              -> list
/// GET /restaurants/{id}         -> get_by_id
/// GET /restaurants/{id}/menus   -> menus
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(restaurants::list))
        .route("/restaurants/{id}", get(restaurants::get_by_id))
        .route("/restaurants/{id}/menus", get(restaurants::menus))
}

/// Restaurant writes (admin only).
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", post(restaurants::create))
        .route(
            "/restaurants/{id}",
            put(restaurants::update).delete(restaurants::delete),
        )
}

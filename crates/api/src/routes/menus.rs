use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::menus;
use crate::state::AppState;

/// Read-only Menu routes.
///
/// ```text
/// GET /menus        -> list
/// GET /menus/{id}   -> get_by_id
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/menus", get(menus::list))
        .route("/menus/{id}", get(menus::get_by_id))
}

/// Menu writes (admin only).
///
/// ```text
/// POST   /menus        -> create
/// PUT    /menus/{id}   -> update
/// DELETE /menus/{id}   -> delete
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/menus", post(menus::create))
        .route("/menus/{id}", put(menus::update).delete(menus::delete))
}

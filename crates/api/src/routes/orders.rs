use axum::routing::get;
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Order routes. All require a token.
///
/// ```text
/// GET    /orders        -> list (admin)
/// POST   /orders        -> create
/// GET    /orders/{id}   -> get_by_id
/// PUT    /orders/{id}   -> update (admin)
/// DELETE /orders/{id}   -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(orders::list).post(orders::create))
        .route(
            "/orders/{id}",
            get(orders::get_by_id)
                .put(orders::update)
                .delete(orders::delete),
        )
}

use axum::routing::get;
use axum::Router;

use crate::handlers::order_items;
use crate::state::AppState;

/// Order item routes. All require a token.
///
/// ```text
/// GET    /order-items                    -> list (admin)
/// POST   /order-items                    -> create (batch)
/// GET    /order-items/{id}               -> get_by_id
/// PUT    /order-items/{id}               -> update
/// DELETE /order-items/{id}               -> delete (admin)
/// GET    /order-items/order/{order_id}   -> by_order
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/order-items",
            get(order_items::list).post(order_items::create),
        )
        .route(
            "/order-items/{id}",
            get(order_items::get_by_id)
                .put(order_items::update)
                .delete(order_items::delete),
        )
        .route("/order-items/order/{order_id}", get(order_items::by_order))
}

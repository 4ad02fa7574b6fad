use axum::routing::get;
use axum::Router;

use crate::handlers::invoices;
use crate::state::AppState;

/// Invoice routes. All require a token.
///
/// ```text
/// GET    /invoices        -> list (admin)
/// POST   /invoices        -> create
/// GET    /invoices/{id}   -> get_by_id
/// PUT    /invoices/{id}   -> update (admin)
/// DELETE /invoices/{id}   -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/invoices", get(invoices::list).post(invoices::create))
        .route(
            "/invoices/{id}",
            get(invoices::get_by_id)
                .put(invoices::update)
                .delete(invoices::delete),
        )
}

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User routes. All require a token.
///
/// ```text
/// GET    /users            -> list (admin)
/// POST   /users            -> create (admin)
/// GET    /users/{id}       -> get_by_id (self or admin)
/// PUT    /users/{id}       -> update (self or admin)
/// DELETE /users/{id}       -> delete (admin)
/// PUT    /users/{id}/role  -> update_role (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/{id}",
            get(users::get_by_id).put(users::update).delete(users::delete),
        )
        .route("/users/{id}/role", put(users::update_role))
}

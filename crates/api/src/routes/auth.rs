use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Session routes. All public; none of them pass the authorization gate.
///
/// ```text
/// POST /register        -> register
/// POST /login           -> login
/// POST /logout          -> logout
/// POST /refresh         -> refresh
/// POST /reset-password  -> reset_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/refresh", post(auth::refresh))
        .route("/reset-password", post(auth::reset_password))
}

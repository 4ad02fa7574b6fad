pub mod auth;
pub mod categories;
pub mod foods;
pub mod health;
pub mod invoices;
pub mod menus;
pub mod order_items;
pub mod orders;
pub mod restaurants;
pub mod tables;
pub mod users;

use axum::{middleware, Router};

use crate::middleware::auth::require_token;
use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /register, /login, /logout, /refresh, /reset-password   public
///
/// /restaurants, /restaurants/{id}, /restaurants/{id}/menus  GET public
/// /menus, /foods, /categories, /tables (+ /{id})            GET public
///     POST, PUT, DELETE on the above                        admin
///
/// /users, /users/{id}                                       token (self or admin)
/// /users/{id}/role                                          admin
///
/// /orders, /orders/{id}                                     token; list/update/delete admin
/// /order-items, /order-items/{id}                           token; list/delete admin
/// /order-items/order/{order_id}                             token
/// /invoices, /invoices/{id}                                 token; list/update/delete admin
/// ```
///
/// Everything in the protected half sits behind [`require_token`], applied
/// with `route_layer` so unmatched paths still fall through to a plain 404.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .merge(auth::router())
        .merge(restaurants::public_router())
        .merge(menus::public_router())
        .merge(foods::public_router())
        .merge(categories::public_router())
        .merge(tables::public_router());

    let protected = Router::new()
        .merge(users::router())
        .merge(restaurants::admin_router())
        .merge(menus::admin_router())
        .merge(foods::admin_router())
        .merge(categories::admin_router())
        .merge(tables::admin_router())
        .merge(orders::router())
        .merge(order_items::router())
        .merge(invoices::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

    public.merge(protected)
}

//! HTTP-level integration tests for registration, login, logout, token
//! refresh and password reset.

mod common;

use axum::http::StatusCode;
use bistro_core::roles::Role;
use common::{body_json, get_auth, post_json, register_user, TEST_PASSWORD};
use serde_json::json;

fn registration(email: &str, phone: &str) -> serde_json::Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": email,
        "password": TEST_PASSWORD,
        "phone": phone,
    })
}

async fn login(app: &axum::Router, email: &str, password: &str) -> axum::response::Response {
    post_json(
        app.clone(),
        "/login",
        json!({ "email": email, "password": password }),
    )
    .await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_returns_201_with_token_pair() {
    let (app, _stores) = common::build_test_app();

    let response = post_json(
        app,
        "/register",
        registration("ada@bistro.test", "+15551234567"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert!(json["refreshToken"].is_string());
    assert_eq!(json["data"]["email"], "ada@bistro.test");
    assert_eq!(json["data"]["role"], "User");
    assert!(json["data"].get("password_hash").is_none(), "hash must never be returned");
    assert!(json["data"].get("token").is_none());
}

#[tokio::test]
async fn register_ignores_requested_role() {
    let (app, stores) = common::build_test_app();

    let mut body = registration("mallory@bistro.test", "+15557654321");
    body["role"] = json!("Admin");
    let response = post_json(app, "/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "User");

    let stored = stores
        .users
        .find_by_email("mallory@bistro.test")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.role, Role::User);
    assert!(stored.password_hash.starts_with("$2"), "password must be stored as a bcrypt hash");
}

#[tokio::test]
async fn register_rejects_invalid_fields() {
    let (app, _stores) = common::build_test_app();

    let response = post_json(
        app.clone(),
        "/register",
        registration("not-an-email", "+15551234567"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let mut short = registration("short@bistro.test", "+15551234567");
    short["password"] = json!("short");
    let response = post_json(app, "/register", short).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn passwords_are_checked_past_the_bcrypt_limit() {
    let (app, _stores) = common::build_test_app();
    let longest = "a".repeat(72);

    let mut overlong = registration("long@bistro.test", "+15551234567");
    overlong["password"] = json!(format!("{longest}x"));
    let response = post_json(app.clone(), "/register", overlong).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut exact = registration("long@bistro.test", "+15551234567");
    exact["password"] = json!(longest);
    let response = post_json(app.clone(), "/register", exact).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = login(&app, "long@bistro.test", &format!("{longest}x")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let response = login(&app, "long@bistro.test", &longest).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_email_or_phone_is_conflict() {
    let (app, _stores) = common::build_test_app();

    let response = post_json(
        app.clone(),
        "/register",
        registration("dup@bistro.test", "+15550000001"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let same_email = post_json(
        app.clone(),
        "/register",
        registration("dup@bistro.test", "+15550000002"),
    )
    .await;
    assert_eq!(same_email.status(), StatusCode::CONFLICT);

    let same_phone = post_json(
        app,
        "/register",
        registration("other@bistro.test", "+15550000001"),
    )
    .await;
    assert_eq!(same_phone.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_success_returns_usable_token() {
    let (app, _stores) = common::build_test_app();
    let user = register_user(&app, 1).await;

    let response = login(&app, &user.email, TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["_id"], user.id.as_str());

    let token = json["token"].as_str().unwrap();
    let response = get_auth(app, &format!("/users/{}", user.id), token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let (app, _stores) = common::build_test_app();
    let user = register_user(&app, 2).await;

    let wrong = login(&app, &user.email, "not-the-password").await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong = body_json(wrong).await;

    let unknown = login(&app, "ghost@bistro.test", TEST_PASSWORD).await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown = body_json(unknown).await;

    assert_eq!(wrong["error"], unknown["error"]);
    assert_eq!(wrong["error"], "invalid email or password");
}

#[tokio::test]
async fn login_requires_both_fields() {
    let (app, _stores) = common::build_test_app();

    let response = login(&app, "", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_persists_the_issued_pair() {
    let (app, stores) = common::build_test_app();
    let user = register_user(&app, 3).await;

    let json = body_json(login(&app, &user.email, TEST_PASSWORD).await).await;

    let stored = stores.users.find_by_id(&user.id).await.unwrap().unwrap();
    assert_eq!(stored.token, json["token"].as_str().unwrap());
    assert_eq!(stored.refresh_token, json["refreshToken"].as_str().unwrap());
}

// ---------------------------------------------------------------------------
// Logout and refresh
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logout_blanks_stored_tokens() {
    let (app, stores) = common::build_test_app();
    let user = register_user(&app, 4).await;

    let response = post_json(app.clone(), "/logout", json!({ "user_id": user.id })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "logged out");

    let stored = stores.users.find_by_id(&user.id).await.unwrap().unwrap();
    assert!(stored.token.is_empty());
    assert!(stored.refresh_token.is_empty());
}

#[tokio::test]
async fn logout_unknown_user_is_404() {
    let (app, _stores) = common::build_test_app();

    let response = post_json(app, "/logout", json!({ "user_id": "000000000000000000000000" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn refresh_token_is_revoked_by_logout() {
    let (app, _stores) = common::build_test_app();
    let user = register_user(&app, 5).await;

    let response = post_json(
        app.clone(),
        "/refresh",
        json!({ "refresh_token": user.refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert!(refreshed["token"].is_string());
    let current_refresh = refreshed["refreshToken"].as_str().unwrap().to_string();

    post_json(app.clone(), "/logout", json!({ "user_id": user.id })).await;

    let response = post_json(app, "/refresh", json!({ "refresh_token": current_refresh })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn access_token_outlives_logout_until_expiry() {
    let (app, _stores) = common::build_test_app();
    let user = register_user(&app, 6).await;

    post_json(app.clone(), "/logout", json!({ "user_id": user.id })).await;

    let response = get_auth(app, &format!("/users/{}", user.id), &user.token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn refresh_token_does_not_pass_the_gate() {
    let (app, _stores) = common::build_test_app();
    let user = register_user(&app, 7).await;
    let uri = format!("/users/{}", user.id);

    let response = get_auth(app.clone(), &uri, &user.refresh_token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    post_json(app.clone(), "/logout", json!({ "user_id": user.id })).await;
    let response = get_auth(app, &uri, &user.refresh_token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "invalid token");
}

#[tokio::test]
async fn refresh_rejects_garbage() {
    let (app, _stores) = common::build_test_app();

    let response = post_json(app, "/refresh", json!({ "refresh_token": "not.a.jwt" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Password reset
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reset_password_swaps_credentials() {
    let (app, _stores) = common::build_test_app();
    let user = register_user(&app, 7).await;

    let response = post_json(
        app.clone(),
        "/reset-password",
        json!({
            "email": user.email,
            "old_password": TEST_PASSWORD,
            "new_password": "a-brand-new-secret",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        login(&app, &user.email, TEST_PASSWORD).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        login(&app, &user.email, "a-brand-new-secret").await.status(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn reset_password_checks_old_password_and_length() {
    let (app, _stores) = common::build_test_app();
    let user = register_user(&app, 8).await;

    let wrong_old = post_json(
        app.clone(),
        "/reset-password",
        json!({
            "email": user.email,
            "old_password": "guess-guess",
            "new_password": "a-brand-new-secret",
        }),
    )
    .await;
    assert_eq!(wrong_old.status(), StatusCode::UNAUTHORIZED);

    let too_short = post_json(
        app,
        "/reset-password",
        json!({
            "email": user.email,
            "old_password": TEST_PASSWORD,
            "new_password": "short",
        }),
    )
    .await;
    assert_eq!(too_short.status(), StatusCode::BAD_REQUEST);
}

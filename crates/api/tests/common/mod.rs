#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use bistro_core::pagination::Page;
use bistro_core::roles::Role;
use bistro_db::models::user::{UpdateUser, User};
use bistro_db::repositories::user_repo::{MemoryUserStore, UserStore};
use bistro_db::{StoreError, Stores};
use http_body_util::BodyExt;
use tower::ServiceExt;

use bistro_api::auth::jwt::JwtConfig;
use bistro_api::config::{MongoConfig, ServerConfig, StoreBackend};
use bistro_api::router::build_app_router;
use bistro_api::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
///
/// Memory backend, a fixed signing secret and the cheapest bcrypt cost.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        bcrypt_cost: 4,
        store_backend: StoreBackend::Memory,
        mongo: MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "bistro_test".to_string(),
        },
        jwt: JwtConfig::new(TEST_SECRET, 24, 7).unwrap(),
    }
}

/// Build the full application router over fresh in-memory stores.
pub fn build_test_app() -> (Router, Stores) {
    build_test_app_with(Stores::memory())
}

/// Build the full application router over the given stores.
///
/// The returned `Stores` shares its backing data with the router, so tests
/// can seed or inspect state directly.
pub fn build_test_app_with(stores: Stores) -> (Router, Stores) {
    let config = test_config();
    let state = AppState::new(stores.clone(), config.clone());
    (build_app_router(state, &config), stores)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::DELETE, uri, Some(token), None)).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// A registered account as seen by the client.
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub token: String,
    pub refresh_token: String,
}

/// Register through the API. `n` keeps email and phone unique per test.
pub async fn register_user(app: &Router, n: u32) -> TestUser {
    let email = format!("user{n}@bistro.test");
    let body = serde_json::json!({
        "first_name": "Test",
        "last_name": format!("User{n}"),
        "email": email,
        "password": TEST_PASSWORD,
        "phone": format!("+1555000{n:04}"),
    });
    let response = post_json(app.clone(), "/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED, "registration should succeed");
    let json = body_json(response).await;
    TestUser {
        id: json["data"]["_id"].as_str().unwrap().to_string(),
        email,
        token: json["token"].as_str().unwrap().to_string(),
        refresh_token: json["refreshToken"].as_str().unwrap().to_string(),
    }
}

/// Grant the admin role directly in the store.
pub async fn promote(stores: &Stores, user_id: &str) {
    stores
        .users
        .update_role(user_id, Role::Admin)
        .await
        .unwrap()
        .expect("user should exist");
}

/// Register a user and promote them.
pub async fn register_admin(app: &Router, stores: &Stores, n: u32) -> TestUser {
    let admin = register_user(app, n).await;
    promote(stores, &admin.id).await;
    admin
}

// ---------------------------------------------------------------------------
// Instrumented user store
// ---------------------------------------------------------------------------

/// Memory user store that counts every call made to it.
#[derive(Default)]
pub struct CountingUserStore {
    inner: MemoryUserStore,
    calls: Arc<AtomicUsize>,
}

impl CountingUserStore {
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let store = Self::default();
        let calls = store.calls.clone();
        (store, calls)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for CountingUserStore {
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        self.tick();
        self.inner.create(user).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        self.tick();
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.tick();
        self.inner.find_by_email(email).await
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, StoreError> {
        self.tick();
        self.inner.list(page).await
    }

    async fn update_profile(
        &self,
        id: &str,
        input: &UpdateUser,
    ) -> Result<Option<User>, StoreError> {
        self.tick();
        self.inner.update_profile(id, input).await
    }

    async fn update_role(&self, id: &str, role: Role) -> Result<Option<User>, StoreError> {
        self.tick();
        self.inner.update_role(id, role).await
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> Result<bool, StoreError> {
        self.tick();
        self.inner.update_password(id, password_hash).await
    }

    async fn update_tokens(
        &self,
        id: &str,
        token: &str,
        refresh_token: &str,
    ) -> Result<bool, StoreError> {
        self.tick();
        self.inner.update_tokens(id, token, refresh_token).await
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.tick();
        self.inner.delete(id).await
    }
}

//! Shared response envelope types for API handlers.
//!
//! Single resources use a `{ "data": ... }` envelope, listings add the page
//! fields, and login/register/refresh add the issued token pair.

use bistro_core::pagination::Page;
use bistro_db::models::user::UserResponse;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ data, page, record_per_page, start_index }` for paginated listings.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub page: u64,
    pub record_per_page: u64,
    pub start_index: u64,
}

impl<T: Serialize> PagedResponse<T> {
    pub fn new(data: Vec<T>, page: Page) -> Self {
        Self {
            data,
            page: page.page,
            record_per_page: page.record_per_page,
            start_index: page.start_index(),
        }
    }
}

/// Body of a successful login, registration, or refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub data: UserResponse,
    pub token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

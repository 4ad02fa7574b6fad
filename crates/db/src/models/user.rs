//! User document model and DTOs.

use bistro_core::roles::Role;
use bistro_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

pub const USERS_COLLECTION: &str = "users";

/// Full user document from the `users` collection.
///
/// Contains the password hash and the current token pair -- NEVER serialize
/// this to API responses directly. Use [`UserResponse`] for external output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// Current access token; empty after logout.
    #[serde(default)]
    pub token: String,
    /// Current refresh token; empty after logout.
    #[serde(default)]
    pub refresh_token: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no hash, no tokens).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub avatar: Option<String>,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            avatar: user.avatar,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Registration body. There is deliberately no `role` field.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub avatar: Option<String>,
}

/// Profile patch. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

//! The credential store: user documents with hashed passwords, roles, and the
//! persisted token pair.

use async_trait::async_trait;
use bistro_core::pagination::Page;
use bistro_core::roles::Role;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, to_bson, Document};
use mongodb::{Collection, Database};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::user::{UpdateUser, User, USERS_COLLECTION};

/// Persistence operations on user records.
///
/// Every write that touches `email` or `phone` fails with
/// [`StoreError::Duplicate`] if another user already holds the value.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn list(&self, page: Page) -> Result<Vec<User>, StoreError>;

    /// Apply a profile patch. Returns `None` if no user has this id.
    async fn update_profile(
        &self,
        id: &str,
        input: &UpdateUser,
    ) -> Result<Option<User>, StoreError>;

    async fn update_role(&self, id: &str, role: Role) -> Result<Option<User>, StoreError>;

    /// Returns `true` if the user exists.
    async fn update_password(&self, id: &str, password_hash: &str) -> Result<bool, StoreError>;

    /// Overwrite both stored tokens and `updated_at`. Last write wins.
    ///
    /// Logout calls this with empty strings. Returns `true` if the user exists.
    async fn update_tokens(
        &self,
        id: &str,
        token: &str,
        refresh_token: &str,
    ) -> Result<bool, StoreError>;

    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

// ---------------------------------------------------------------------------
// MongoDB
// ---------------------------------------------------------------------------

pub struct MongoUserStore {
    collection: Collection<User>,
}

impl MongoUserStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<User>(USERS_COLLECTION),
        }
    }

    /// `$set` with `updated_at` and the given fields, returning the new document.
    async fn set_fields(&self, id: &str, mut fields: Document) -> Result<Option<User>, StoreError> {
        fields.insert("updated_at", to_bson(&Utc::now())?);
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": fields })
            .return_document(mongodb::options::ReturnDocument::After)
            .await?;
        Ok(updated)
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        self.collection.insert_one(user).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, StoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .skip(page.start_index())
            .limit(page.record_per_page as i64)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update_profile(
        &self,
        id: &str,
        input: &UpdateUser,
    ) -> Result<Option<User>, StoreError> {
        let mut fields = Document::new();
        if let Some(v) = &input.first_name {
            fields.insert("first_name", v.as_str());
        }
        if let Some(v) = &input.last_name {
            fields.insert("last_name", v.as_str());
        }
        if let Some(v) = &input.email {
            fields.insert("email", v.as_str());
        }
        if let Some(v) = &input.phone {
            fields.insert("phone", v.as_str());
        }
        if let Some(v) = &input.avatar {
            fields.insert("avatar", v.as_str());
        }
        self.set_fields(id, fields).await
    }

    async fn update_role(&self, id: &str, role: Role) -> Result<Option<User>, StoreError> {
        self.set_fields(id, doc! { "role": role.as_str() }).await
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> Result<bool, StoreError> {
        let updated = self
            .set_fields(id, doc! { "password_hash": password_hash })
            .await?;
        Ok(updated.is_some())
    }

    async fn update_tokens(
        &self,
        id: &str,
        token: &str,
        refresh_token: &str,
    ) -> Result<bool, StoreError> {
        let now = to_bson(&Utc::now())?;
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "token": token,
                    "refresh_token": refresh_token,
                    "updated_at": now,
                } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

// ---------------------------------------------------------------------------
// Memory
// ---------------------------------------------------------------------------

/// In-process user store enforcing the same unique e-mail and phone rules as
/// the MongoDB indexes.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

fn check_unique(
    users: &[User],
    skip_id: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<(), StoreError> {
    for other in users.iter().filter(|u| Some(u.id.as_str()) != skip_id) {
        if email == Some(other.email.as_str()) {
            return Err(StoreError::Duplicate(format!(
                "email {} already exists",
                other.email
            )));
        }
        if phone == Some(other.phone.as_str()) {
            return Err(StoreError::Duplicate(format!(
                "phone {} already exists",
                other.phone
            )));
        }
    }
    Ok(())
}

impl MemoryUserStore {
    async fn modify<F>(&self, id: &str, apply: F) -> Result<Option<User>, StoreError>
    where
        F: FnOnce(&mut User) + Send,
    {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                apply(user);
                user.updated_at = Utc::now();
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id == user.id) {
            return Err(StoreError::Duplicate(format!("user id {} already exists", user.id)));
        }
        check_unique(&users, None, Some(&user.email), Some(&user.phone))?;
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().await;
        Ok(page.apply(&users))
    }

    async fn update_profile(
        &self,
        id: &str,
        input: &UpdateUser,
    ) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        check_unique(&users, Some(id), input.email.as_deref(), input.phone.as_deref())?;

        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(v) = &input.first_name {
            user.first_name = v.clone();
        }
        if let Some(v) = &input.last_name {
            user.last_name = v.clone();
        }
        if let Some(v) = &input.email {
            user.email = v.clone();
        }
        if let Some(v) = &input.phone {
            user.phone = v.clone();
        }
        if let Some(v) = &input.avatar {
            user.avatar = Some(v.clone());
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn update_role(&self, id: &str, role: Role) -> Result<Option<User>, StoreError> {
        self.modify(id, |u| u.role = role).await
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> Result<bool, StoreError> {
        let hash = password_hash.to_string();
        Ok(self.modify(id, move |u| u.password_hash = hash).await?.is_some())
    }

    async fn update_tokens(
        &self,
        id: &str,
        token: &str,
        refresh_token: &str,
    ) -> Result<bool, StoreError> {
        let (token, refresh_token) = (token.to_string(), refresh_token.to_string());
        let updated = self
            .modify(id, move |u| {
                u.token = token;
                u.refresh_token = refresh_token;
            })
            .await?;
        Ok(updated.is_some())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

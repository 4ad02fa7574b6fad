//! Store traits and their MongoDB / memory backends.
//!
//! Stores are trait objects so the API can be wired to either backend (or to
//! an instrumented wrapper in tests) without knowing which one it holds.

pub mod document_repo;
pub mod order_summary_repo;
pub mod user_repo;

use async_trait::async_trait;
use bistro_core::pagination::Page;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// A document that lives in its own collection, keyed by a string `_id`.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    const COLLECTION: &'static str;
    /// Human-readable name used in not-found messages.
    const NAME: &'static str;

    fn id(&self) -> &str;
}

/// Generic CRUD over one collection.
///
/// Field filters compare a top-level string field for equality, which is all
/// the foreign-key style lookups (`menu_id`, `order_id`, ...) need.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError>;

    /// All documents whose `_id` is in `ids`. Missing ids are skipped.
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<T>, StoreError>;

    /// All documents where `field == value`, in insertion order.
    async fn find_by_field(&self, field: &str, value: &str) -> Result<Vec<T>, StoreError>;

    /// One page of documents, optionally narrowed by `field == value`.
    async fn list(
        &self,
        filter: Option<(&str, &str)>,
        page: Page,
    ) -> Result<Vec<T>, StoreError>;

    async fn insert(&self, doc: &T) -> Result<(), StoreError>;

    /// Replace the stored document with the same id. Returns `false` if none exists.
    async fn replace(&self, doc: &T) -> Result<bool, StoreError>;

    /// Returns `true` if a document was removed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Remove every document where `field == value`, returning the count.
    async fn delete_by_field(&self, field: &str, value: &str) -> Result<u64, StoreError>;
}

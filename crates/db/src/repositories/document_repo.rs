//! Generic [`Repository`] backends for the catalogue and ordering collections.

use async_trait::async_trait;
use bistro_core::pagination::Page;
use futures::TryStreamExt;
use mongodb::bson::{doc, to_document, Document};
use mongodb::{Collection, Database};
use tokio::sync::RwLock;

use super::{Entity, Repository};
use crate::error::StoreError;

fn field_filter(field: &str, value: &str) -> Document {
    let mut filter = Document::new();
    filter.insert(field, value);
    filter
}

// ---------------------------------------------------------------------------
// MongoDB
// ---------------------------------------------------------------------------

/// A repository over the `T::COLLECTION` collection.
pub struct MongoRepository<T: Entity> {
    collection: Collection<T>,
}

impl<T: Entity> MongoRepository<T> {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<T>(T::COLLECTION),
        }
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MongoRepository<T> {
    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<T>, StoreError> {
        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .sort(doc! { "_id": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_field(&self, field: &str, value: &str) -> Result<Vec<T>, StoreError> {
        let cursor = self
            .collection
            .find(field_filter(field, value))
            .sort(doc! { "_id": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list(
        &self,
        filter: Option<(&str, &str)>,
        page: Page,
    ) -> Result<Vec<T>, StoreError> {
        let filter = match filter {
            Some((field, value)) => field_filter(field, value),
            None => Document::new(),
        };
        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "_id": 1 })
            .skip(page.start_index())
            .limit(page.record_per_page as i64)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, doc: &T) -> Result<(), StoreError> {
        self.collection.insert_one(doc).await?;
        Ok(())
    }

    async fn replace(&self, doc: &T) -> Result<bool, StoreError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": doc.id() }, doc)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn delete_by_field(&self, field: &str, value: &str) -> Result<u64, StoreError> {
        let result = self
            .collection
            .delete_many(field_filter(field, value))
            .await?;
        Ok(result.deleted_count)
    }
}

// ---------------------------------------------------------------------------
// Memory
// ---------------------------------------------------------------------------

/// An in-process repository. Documents are kept in insertion order.
pub struct MemoryRepository<T: Entity> {
    docs: RwLock<Vec<T>>,
}

impl<T: Entity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
        }
    }
}

/// Compare a top-level string field through the document's BSON form, the
/// same representation the MongoDB backend filters on.
fn field_matches<T: Entity>(doc: &T, field: &str, value: &str) -> Result<bool, StoreError> {
    let document = to_document(doc)?;
    Ok(document.get_str(field).is_ok_and(|v| v == value))
}

fn filter_docs<T: Entity>(docs: &[T], field: &str, value: &str) -> Result<Vec<T>, StoreError> {
    let mut matched = Vec::new();
    for doc in docs {
        if field_matches(doc, field, value)? {
            matched.push(doc.clone());
        }
    }
    Ok(matched)
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs.iter().find(|d| d.id() == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<T>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs
            .iter()
            .filter(|d| ids.iter().any(|id| id == d.id()))
            .cloned()
            .collect())
    }

    async fn find_by_field(&self, field: &str, value: &str) -> Result<Vec<T>, StoreError> {
        let docs = self.docs.read().await;
        filter_docs(&docs, field, value)
    }

    async fn list(
        &self,
        filter: Option<(&str, &str)>,
        page: Page,
    ) -> Result<Vec<T>, StoreError> {
        let docs = self.docs.read().await;
        match filter {
            Some((field, value)) => Ok(page.apply(&filter_docs(&docs, field, value)?)),
            None => Ok(page.apply(&docs)),
        }
    }

    async fn insert(&self, doc: &T) -> Result<(), StoreError> {
        let mut docs = self.docs.write().await;
        if docs.iter().any(|d| d.id() == doc.id()) {
            return Err(StoreError::Duplicate(format!(
                "{} with id {} already exists",
                T::NAME,
                doc.id()
            )));
        }
        docs.push(doc.clone());
        Ok(())
    }

    async fn replace(&self, doc: &T) -> Result<bool, StoreError> {
        let mut docs = self.docs.write().await;
        match docs.iter_mut().find(|d| d.id() == doc.id()) {
            Some(slot) => {
                *slot = doc.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|d| d.id() != id);
        Ok(docs.len() < before)
    }

    async fn delete_by_field(&self, field: &str, value: &str) -> Result<u64, StoreError> {
        let mut docs = self.docs.write().await;
        let mut kept = Vec::with_capacity(docs.len());
        let mut removed = 0;
        for doc in docs.drain(..) {
            if field_matches(&doc, field, value)? {
                removed += 1;
            } else {
                kept.push(doc);
            }
        }
        *docs = kept;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::food::Food;
    use chrono::Utc;

    fn food(id: &str, menu_id: &str) -> Food {
        Food {
            id: id.to_string(),
            name: format!("Dish {id}"),
            description: String::new(),
            price: 9.5,
            food_image: String::new(),
            menu_id: menu_id.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_then_find() {
        let repo = MemoryRepository::<Food>::default();
        repo.insert(&food("f1", "m1")).await.unwrap();

        let found = repo.find_by_id("f1").await.unwrap().unwrap();
        assert_eq!(found.menu_id, "m1");
        assert!(repo.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let repo = MemoryRepository::<Food>::default();
        repo.insert(&food("f1", "m1")).await.unwrap();
        let err = repo.insert(&food("f1", "m2")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn field_filter_and_paging() {
        let repo = MemoryRepository::<Food>::default();
        for i in 0..5 {
            repo.insert(&food(&format!("a{i}"), "m1")).await.unwrap();
        }
        repo.insert(&food("b0", "m2")).await.unwrap();

        assert_eq!(repo.find_by_field("menu_id", "m1").await.unwrap().len(), 5);

        let page = Page::new(Some(2), Some(2));
        let listed = repo.list(Some(("menu_id", "m1")), page).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["a2", "a3"]);

        let all = repo.list(None, Page::default()).await.unwrap();
        assert_eq!(all.len(), 6);
    }

    #[tokio::test]
    async fn replace_and_delete() {
        let repo = MemoryRepository::<Food>::default();
        let mut f = food("f1", "m1");
        repo.insert(&f).await.unwrap();

        f.price = 12.0;
        assert!(repo.replace(&f).await.unwrap());
        assert_eq!(repo.find_by_id("f1").await.unwrap().unwrap().price, 12.0);
        assert!(!repo.replace(&food("nope", "m1")).await.unwrap());

        assert!(repo.delete("f1").await.unwrap());
        assert!(!repo.delete("f1").await.unwrap());
    }

    #[tokio::test]
    async fn delete_by_field_counts_removed() {
        let repo = MemoryRepository::<Food>::default();
        repo.insert(&food("f1", "m1")).await.unwrap();
        repo.insert(&food("f2", "m1")).await.unwrap();
        repo.insert(&food("f3", "m2")).await.unwrap();

        assert_eq!(repo.delete_by_field("menu_id", "m1").await.unwrap(), 2);
        assert_eq!(repo.find_by_ids(&["f1".into(), "f3".into()]).await.unwrap().len(), 1);
    }
}

//! Index bootstrap for the MongoDB backend.

use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Database, IndexModel};

use crate::error::StoreError;
use crate::models::order_item::OrderItem;
use crate::models::user::{User, USERS_COLLECTION};
use crate::repositories::Entity;

/// Create the unique `users.email` / `users.phone` indexes and the lookup
/// index on `order_items.order_id`. Idempotent.
pub async fn ensure_indexes(db: &Database) -> Result<(), StoreError> {
    let users = db.collection::<User>(USERS_COLLECTION);
    for field in ["email", "phone"] {
        let mut keys = Document::new();
        keys.insert(field, 1);
        let model = IndexModel::builder()
            .keys(keys)
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(format!("users_{field}_unique"))
                    .build(),
            )
            .build();
        users.create_index(model).await?;
        tracing::debug!(field, "Ensured unique index on users");
    }

    let order_items = db.collection::<OrderItem>(OrderItem::COLLECTION);
    order_items
        .create_index(IndexModel::builder().keys(doc! { "order_id": 1 }).build())
        .await?;

    tracing::info!("Database indexes ensured");
    Ok(())
}

//! Document persistence for the restaurant ordering backend.
//!
//! Every store is a trait with a MongoDB backend and an in-process memory
//! backend. The API receives a [`Stores`] bundle by constructor injection and
//! never touches a driver handle directly.

pub mod error;
pub mod indexes;
pub mod models;
pub mod repositories;

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Database};

use crate::models::category::Category;
use crate::models::food::Food;
use crate::models::invoice::Invoice;
use crate::models::menu::Menu;
use crate::models::order::Order;
use crate::models::order_item::OrderItem;
use crate::models::restaurant::Restaurant;
use crate::models::table::Table;
use crate::repositories::document_repo::{MemoryRepository, MongoRepository};
use crate::repositories::order_summary_repo::{
    MemoryOrderSummaryStore, MongoOrderSummaryStore, OrderSummaryStore,
};
use crate::repositories::user_repo::{MemoryUserStore, MongoUserStore, UserStore};
use crate::repositories::Repository;

pub use error::StoreError;
pub use indexes::ensure_indexes;

/// Connect to MongoDB and select the application database.
pub async fn connect(uri: &str, database: &str) -> Result<Database, StoreError> {
    let client = Client::with_uri_str(uri).await?;
    Ok(client.database(database))
}

/// Round-trip a `ping` command to verify the server is reachable.
pub async fn health_check(db: &Database) -> Result<(), StoreError> {
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}

/// Generate a fresh document id (ObjectId hex string).
pub fn new_id() -> String {
    ObjectId::new().to_hex()
}

/// Every store the API needs, behind trait objects.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub restaurants: Arc<dyn Repository<Restaurant>>,
    pub menus: Arc<dyn Repository<Menu>>,
    pub foods: Arc<dyn Repository<Food>>,
    pub categories: Arc<dyn Repository<Category>>,
    pub tables: Arc<dyn Repository<Table>>,
    pub orders: Arc<dyn Repository<Order>>,
    pub order_items: Arc<dyn Repository<OrderItem>>,
    pub invoices: Arc<dyn Repository<Invoice>>,
    pub order_summaries: Arc<dyn OrderSummaryStore>,
    /// `None` for the memory backend.
    database: Option<Database>,
}

impl Stores {
    pub fn mongo(db: &Database) -> Self {
        Self {
            users: Arc::new(MongoUserStore::new(db)),
            restaurants: Arc::new(MongoRepository::new(db)),
            menus: Arc::new(MongoRepository::new(db)),
            foods: Arc::new(MongoRepository::new(db)),
            categories: Arc::new(MongoRepository::new(db)),
            tables: Arc::new(MongoRepository::new(db)),
            orders: Arc::new(MongoRepository::new(db)),
            order_items: Arc::new(MongoRepository::new(db)),
            invoices: Arc::new(MongoRepository::new(db)),
            order_summaries: Arc::new(MongoOrderSummaryStore::new(db)),
            database: Some(db.clone()),
        }
    }

    /// Fully in-process stores. The order summary store shares the order,
    /// order item, food and table repositories so it joins live data.
    pub fn memory() -> Self {
        let foods = Arc::new(MemoryRepository::<Food>::default());
        let tables = Arc::new(MemoryRepository::<Table>::default());
        let orders = Arc::new(MemoryRepository::<Order>::default());
        let order_items = Arc::new(MemoryRepository::<OrderItem>::default());
        let order_summaries = MemoryOrderSummaryStore::new(
            orders.clone(),
            order_items.clone(),
            foods.clone(),
            tables.clone(),
        );

        Self {
            users: Arc::new(MemoryUserStore::default()),
            restaurants: Arc::new(MemoryRepository::<Restaurant>::default()),
            menus: Arc::new(MemoryRepository::<Menu>::default()),
            foods,
            categories: Arc::new(MemoryRepository::<Category>::default()),
            tables,
            orders,
            order_items,
            invoices: Arc::new(MemoryRepository::<Invoice>::default()),
            order_summaries: Arc::new(order_summaries),
            database: None,
        }
    }

    /// Replace the user store, e.g. with an instrumented wrapper.
    pub fn with_users(mut self, users: Arc<dyn UserStore>) -> Self {
        self.users = users;
        self
    }

    /// Whether the backing store is reachable. Always true in memory.
    pub async fn is_healthy(&self) -> bool {
        match &self.database {
            Some(db) => health_check(db).await.is_ok(),
            None => true,
        }
    }
}

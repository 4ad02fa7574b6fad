//! Order-item denormalization: joins an order's items with their foods and
//! the order's table, then folds the lines through
//! [`bistro_core::orders::summarize_order`].

use std::sync::Arc;

use async_trait::async_trait;
use bistro_core::orders::{summarize_order, OrderLine, OrderSummary};
use futures::TryStreamExt;
use mongodb::bson::{doc, from_document, Document};
use mongodb::{Collection, Database};

use super::{Entity, Repository};
use crate::error::StoreError;
use crate::models::food::Food;
use crate::models::order::Order;
use crate::models::order_item::OrderItem;
use crate::models::table::Table;

#[async_trait]
pub trait OrderSummaryStore: Send + Sync {
    /// Returns `None` if the order does not exist.
    async fn summarize(&self, order_id: &str) -> Result<Option<OrderSummary>, StoreError>;
}

/// Aggregation over `order_items` producing one [`OrderLine`]-shaped document
/// per item. Items whose food no longer exists are dropped by the `$unwind`.
pub fn order_lines_pipeline(order_id: &str) -> Vec<Document> {
    vec![
        doc! { "$match": { "order_id": order_id } },
        doc! { "$lookup": {
            "from": Food::COLLECTION,
            "localField": "food_id",
            "foreignField": "_id",
            "as": "food",
        } },
        doc! { "$unwind": "$food" },
        doc! { "$sort": { "_id": 1 } },
        doc! { "$project": {
            "_id": 0,
            "order_item_id": "$_id",
            "food_id": 1,
            "food_name": "$food.name",
            "food_image": "$food.food_image",
            "unit_price": 1,
            "quantity": 1,
            "total_amount": 1,
        } },
    ]
}

// ---------------------------------------------------------------------------
// MongoDB
// ---------------------------------------------------------------------------

pub struct MongoOrderSummaryStore {
    orders: Collection<Order>,
    tables: Collection<Table>,
    order_items: Collection<Document>,
}

impl MongoOrderSummaryStore {
    pub fn new(db: &Database) -> Self {
        Self {
            orders: db.collection(Order::COLLECTION),
            tables: db.collection(Table::COLLECTION),
            order_items: db.collection(OrderItem::COLLECTION),
        }
    }
}

#[async_trait]
impl OrderSummaryStore for MongoOrderSummaryStore {
    async fn summarize(&self, order_id: &str) -> Result<Option<OrderSummary>, StoreError> {
        let Some(order) = self.orders.find_one(doc! { "_id": order_id }).await? else {
            return Ok(None);
        };

        let table = self
            .tables
            .find_one(doc! { "_id": order.table_id.as_str() })
            .await?;

        let cursor = self
            .order_items
            .aggregate(order_lines_pipeline(order_id))
            .await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        let lines = docs
            .into_iter()
            .map(from_document::<OrderLine>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(summarize_order(
            order.id,
            order.table_id,
            table.map(|t| t.table_number),
            lines,
        )))
    }
}

// ---------------------------------------------------------------------------
// Memory
// ---------------------------------------------------------------------------

/// Performs the same join in process over the shared repositories.
pub struct MemoryOrderSummaryStore {
    orders: Arc<dyn Repository<Order>>,
    order_items: Arc<dyn Repository<OrderItem>>,
    foods: Arc<dyn Repository<Food>>,
    tables: Arc<dyn Repository<Table>>,
}

impl MemoryOrderSummaryStore {
    pub fn new(
        orders: Arc<dyn Repository<Order>>,
        order_items: Arc<dyn Repository<OrderItem>>,
        foods: Arc<dyn Repository<Food>>,
        tables: Arc<dyn Repository<Table>>,
    ) -> Self {
        Self {
            orders,
            order_items,
            foods,
            tables,
        }
    }
}

#[async_trait]
impl OrderSummaryStore for MemoryOrderSummaryStore {
    async fn summarize(&self, order_id: &str) -> Result<Option<OrderSummary>, StoreError> {
        let Some(order) = self.orders.find_by_id(order_id).await? else {
            return Ok(None);
        };
        let table = self.tables.find_by_id(&order.table_id).await?;

        let mut items = self.order_items.find_by_field("order_id", order_id).await?;
        items.sort_by(|a, b| a.id.cmp(&b.id));

        let food_ids: Vec<String> = items.iter().map(|i| i.food_id.clone()).collect();
        let foods = self.foods.find_by_ids(&food_ids).await?;

        let lines = items
            .into_iter()
            .filter_map(|item| {
                let food = foods.iter().find(|f| f.id == item.food_id)?;
                Some(OrderLine {
                    order_item_id: item.id,
                    food_id: item.food_id,
                    food_name: food.name.clone(),
                    food_image: Some(food.food_image.clone()),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    total_amount: item.total_amount,
                })
            })
            .collect();

        Ok(Some(summarize_order(
            order.id,
            order.table_id,
            table.map(|t| t.table_number),
            lines,
        )))
    }
}

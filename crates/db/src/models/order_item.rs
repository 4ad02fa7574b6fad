//! Order item document model and DTOs.

use bistro_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::repositories::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub order_id: EntityId,
    pub food_id: EntityId,
    pub quantity: i64,
    /// Copied from the food at creation time.
    pub unit_price: f64,
    pub total_amount: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for OrderItem {
    const COLLECTION: &'static str = "order_items";
    const NAME: &'static str = "Order item";

    fn id(&self) -> &str {
        &self.id
    }
}

/// One line of a batch create.
#[derive(Debug, Deserialize)]
pub struct NewOrderLine {
    pub food_id: EntityId,
    pub quantity: i64,
}

/// Batch create: opens an order on `table_id` and adds every line to it.
#[derive(Debug, Deserialize)]
pub struct CreateOrderItems {
    pub table_id: EntityId,
    pub order_items: Vec<NewOrderLine>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrderItem {
    pub food_id: Option<EntityId>,
    pub quantity: Option<i64>,
}

//! Order document model and DTOs.

use bistro_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::repositories::Entity;

pub const DEFAULT_ORDER_STATUS: &str = "pending";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub table_id: EntityId,
    pub order_status: String,
    pub order_date: Timestamp,
    /// Sum of the order's item totals, kept in step by the order item handlers.
    pub total_amount: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for Order {
    const COLLECTION: &'static str = "orders";
    const NAME: &'static str = "Order";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOrder {
    pub table_id: EntityId,
    pub order_status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrder {
    pub table_id: Option<EntityId>,
    pub order_status: Option<String>,
}

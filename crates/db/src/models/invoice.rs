//! Invoice document model and DTOs.

use bistro_core::billing::{PaymentMethod, PaymentStatus};
use bistro_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::repositories::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub order_id: EntityId,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_due_date: Timestamp,
    pub total_amount: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for Invoice {
    const COLLECTION: &'static str = "invoices";
    const NAME: &'static str = "Invoice";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoice {
    pub order_id: EntityId,
    pub payment_method: PaymentMethod,
    pub payment_due_date: Option<Timestamp>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateInvoice {
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_due_date: Option<Timestamp>,
}

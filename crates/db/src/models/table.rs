//! Dining table document model and DTOs.

use bistro_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::repositories::Entity;

pub const DEFAULT_TABLE_STATUS: &str = "available";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub table_number: i64,
    pub number_of_guests: i64,
    pub table_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for Table {
    const COLLECTION: &'static str = "tables";
    const NAME: &'static str = "Table";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTable {
    pub table_number: i64,
    pub number_of_guests: i64,
    pub table_status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTable {
    pub table_number: Option<i64>,
    pub number_of_guests: Option<i64>,
    pub table_status: Option<String>,
}

//! Food document model and DTOs.

use bistro_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::repositories::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
    pub description: String,
    /// Rounded to 2 decimals on write.
    pub price: f64,
    pub food_image: String,
    pub menu_id: EntityId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for Food {
    const COLLECTION: &'static str = "foods";
    const NAME: &'static str = "Food";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateFood {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub food_image: String,
    pub menu_id: EntityId,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateFood {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub food_image: Option<String>,
    pub menu_id: Option<EntityId>,
}

//! Restaurant document model and DTOs.

use bistro_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::repositories::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub title: String,
    pub image: String,
    /// Free-text opening hours, e.g. `"10:00-22:00"`.
    pub time: String,
    pub pickup: bool,
    pub delivery: bool,
    pub rating: f64,
    #[serde(rename = "ratingCount")]
    pub rating_count: i64,
    pub menu_ids: Vec<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for Restaurant {
    const COLLECTION: &'static str = "restaurants";
    const NAME: &'static str = "Restaurant";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateRestaurant {
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub pickup: bool,
    #[serde(default)]
    pub delivery: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default, rename = "ratingCount")]
    pub rating_count: i64,
    #[serde(default)]
    pub menu_ids: Vec<EntityId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRestaurant {
    pub title: Option<String>,
    pub image: Option<String>,
    pub time: Option<String>,
    pub pickup: Option<bool>,
    pub delivery: Option<bool>,
    pub rating: Option<f64>,
    #[serde(rename = "ratingCount")]
    pub rating_count: Option<i64>,
    pub menu_ids: Option<Vec<EntityId>>,
}

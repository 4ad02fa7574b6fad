//! Category document model and DTOs.

use bistro_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::repositories::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub title: String,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for Category {
    const COLLECTION: &'static str = "categories";
    const NAME: &'static str = "Category";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub title: String,
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategory {
    pub title: Option<String>,
    pub image: Option<String>,
}

//! Menu document model and DTOs.

use bistro_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::repositories::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for Menu {
    const COLLECTION: &'static str = "menus";
    const NAME: &'static str = "Menu";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateMenu {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMenu {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}

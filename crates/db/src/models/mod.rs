//! Document models and DTOs.
//!
//! Each submodule contains:
//! - A `Serialize + Deserialize` document struct stored as-is in its collection
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod category;
pub mod food;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod restaurant;
pub mod table;
pub mod user;

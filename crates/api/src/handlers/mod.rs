pub mod auth;
pub mod categories;
pub mod foods;
pub mod invoices;
pub mod menus;
pub mod order_items;
pub mod orders;
pub mod restaurants;
pub mod tables;
pub mod users;

use bistro_core::error::CoreError;
use bistro_db::repositories::{Entity, Repository};

use crate::error::{AppError, AppResult};

/// Load a document by id or fail with 404.
pub(crate) async fn find_or_404<T: Entity>(repo: &dyn Repository<T>, id: &str) -> AppResult<T> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(T::NAME, id)))
}

/// Load the document a foreign-key style field points at, or fail with 400.
pub(crate) async fn require_reference<T: Entity>(
    repo: &dyn Repository<T>,
    field: &str,
    id: &str,
) -> AppResult<T> {
    repo.find_by_id(id).await?.ok_or_else(|| {
        AppError::validation(format!(
            "{field} '{id}' does not reference an existing {}",
            T::NAME.to_lowercase()
        ))
    })
}

pub(crate) fn not_found<T: Entity>(id: &str) -> AppError {
    AppError::Core(CoreError::not_found(T::NAME, id))
}

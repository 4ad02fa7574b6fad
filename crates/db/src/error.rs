//! Persistence error type shared by every store backend.

use mongodb::error::{ErrorKind, WriteFailure};

/// MongoDB server code for a unique index violation.
pub const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(mongodb::error::Error),

    #[error("Document serialization error: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),

    #[error("Document deserialization error: {0}")]
    Deserialization(#[from] mongodb::bson::de::Error),

    /// A unique index (or the memory backend's equivalent check) rejected the write.
    #[error("Duplicate value: {0}")]
    Duplicate(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        let duplicate = match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE => {
                Some(e.message.clone())
            }
            // findAndModify reports index violations as command errors.
            ErrorKind::Command(e) if e.code == DUPLICATE_KEY_CODE => Some(e.message.clone()),
            _ => None,
        };
        match duplicate {
            Some(message) => StoreError::Duplicate(message),
            None => StoreError::Database(err),
        }
    }
}

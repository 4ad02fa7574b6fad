//! Pure domain logic for the restaurant ordering backend.
//!
//! Nothing in this crate performs I/O. Persistence lives in `bistro-db` and
//! HTTP concerns in `bistro-api`.

pub mod billing;
pub mod error;
pub mod orders;
pub mod pagination;
pub mod roles;
pub mod types;
pub mod validation;

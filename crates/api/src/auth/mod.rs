//! Authentication primitives.
//!
//! - [`password`] -- bcrypt password hashing and verification.
//! - [`jwt`] -- HS256 access/refresh token issuance and validation.
//! - [`session`] -- persisting the current token pair on the user record.

pub mod jwt;
pub mod password;
pub mod session;

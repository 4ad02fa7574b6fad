//! Authorization gate and role checks.
//!
//! - [`auth::require_token`] -- middleware that validates the `Authorization`
//!   token and injects [`auth::AuthUser`] into the request extensions.
//! - [`auth::AuthUser`] -- extractor for the identity the gate injected.
//! - [`rbac::RequireAdmin`] -- requires the caller's stored role to be `Admin`.

pub mod auth;
pub mod rbac;

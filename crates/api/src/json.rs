//! JSON body extractor whose rejection is an [`AppError`].
//!
//! `axum::Json` rejects malformed bodies with a plain-text response; routing
//! them through [`AppError`] keeps every error body in the `{error, code}` shape.

use axum::extract::FromRequest;

use crate::error::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

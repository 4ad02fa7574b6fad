//! Input validation rules shared by the registration and catalogue handlers.
//!
//! Every function returns `Err(CoreError::Validation)` with a message that is
//! safe to show to the client.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use validator::ValidateEmail;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum accepted password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// bcrypt only reads this many bytes of a password.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Maximum length for person names and catalogue titles.
pub const MAX_NAME_LENGTH: usize = 100;

/// Upper bound of the restaurant rating scale.
pub const MAX_RATING: f64 = 5.0;

/// 7 to 15 digits with an optional leading `+`.
pub const PHONE_PATTERN: &str = r"^\+?[0-9]{7,15}$";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Identity fields
// ---------------------------------------------------------------------------

/// Validate a required, human-readable name (first name, title, ...).
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    if !PHONE_RE.is_match(phone) {
        return Err(CoreError::Validation(
            "phone must contain 7 to 15 digits, optionally prefixed with '+'".to_string(),
        ));
    }
    Ok(())
}

/// Only the length is checked; the hash is what gets stored.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(CoreError::Validation(format!(
            "password must be at most {MAX_PASSWORD_BYTES} bytes"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Catalogue and ordering fields
// ---------------------------------------------------------------------------

/// Validate a price: finite and strictly positive.
pub fn validate_price(price: f64) -> Result<(), CoreError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(CoreError::Validation(format!(
            "price must be greater than 0, got {price}"
        )));
    }
    Ok(())
}

pub fn validate_rating(rating: f64) -> Result<(), CoreError> {
    if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "rating must be between 0 and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}

pub fn validate_rating_count(count: i64) -> Result<(), CoreError> {
    if count < 0 {
        return Err(CoreError::Validation(format!(
            "rating_count must be >= 0, got {count}"
        )));
    }
    Ok(())
}

pub fn validate_quantity(quantity: i64) -> Result<(), CoreError> {
    if quantity < 1 {
        return Err(CoreError::Validation(format!(
            "quantity must be >= 1, got {quantity}"
        )));
    }
    Ok(())
}

pub fn validate_table_number(number: i64) -> Result<(), CoreError> {
    if number < 1 {
        return Err(CoreError::Validation(format!(
            "table_number must be >= 1, got {number}"
        )));
    }
    Ok(())
}

pub fn validate_guests(guests: i64) -> Result<(), CoreError> {
    if guests < 1 {
        return Err(CoreError::Validation(format!(
            "number_of_guests must be >= 1, got {guests}"
        )));
    }
    Ok(())
}

/// When both bounds are present the start must not come after the end.
pub fn validate_date_range(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(), CoreError> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(CoreError::Validation(
                "start_date must not be after end_date".to_string(),
            ));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Invoice payment enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Card,
    Cash,
}

/// Invoices start `PENDING` and move to `PAID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::Cash => "CASH",
        }
    }
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CARD" => Ok(PaymentMethod::Card),
            "CASH" => Ok(PaymentMethod::Cash),
            other => Err(CoreError::Validation(format!(
                "payment_method must be CARD or CASH, got '{other}'"
            ))),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(PaymentStatus::Pending),
            "PAID" => Ok(PaymentStatus::Paid),
            other => Err(CoreError::Validation(format!(
                "payment_status must be PENDING or PAID, got '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_uppercase() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Card).unwrap(), "\"CARD\"");
        assert_eq!(serde_json::to_string(&PaymentStatus::Paid).unwrap(), "\"PAID\"");
        let m: PaymentMethod = serde_json::from_str("\"CASH\"").unwrap();
        assert_eq!(m, PaymentMethod::Cash);
    }

    #[test]
    fn lowercase_method_is_rejected() {
        assert!(serde_json::from_str::<PaymentMethod>("\"card\"").is_err());
        assert!("card".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn status_defaults_to_pending() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
        assert_eq!("PAID".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
    }
}

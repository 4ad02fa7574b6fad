//! Order arithmetic: currency rounding, line totals, and the order summary
//! produced by the order-item denormalization query.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Round a currency amount to 2 decimal places.
///
/// ```
/// use bistro_core::orders::round_currency;
///
/// assert_eq!(round_currency(12.345), 12.35);
/// assert_eq!(round_currency(3.0), 3.0);
/// ```
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Total for one order line, rounded.
pub fn line_total(unit_price: f64, quantity: i64) -> f64 {
    round_currency(round_currency(unit_price) * quantity as f64)
}

/// Sum a set of line totals into an order total.
pub fn order_total<I>(line_totals: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    round_currency(line_totals.into_iter().sum())
}

/// One order item joined with its food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_item_id: EntityId,
    pub food_id: EntityId,
    pub food_name: String,
    pub food_image: Option<String>,
    pub unit_price: f64,
    pub quantity: i64,
    pub total_amount: f64,
}

/// Denormalized view of an order and its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: EntityId,
    pub table_id: EntityId,
    pub table_number: Option<i64>,
    /// Number of order items.
    pub total_count: usize,
    pub payment_due: f64,
    pub order_items: Vec<OrderLine>,
}

/// Fold joined lines into a summary.
///
/// `payment_due` is recomputed from each line's price and quantity, not
/// trusted from the stored per-line totals.
pub fn summarize_order(
    order_id: EntityId,
    table_id: EntityId,
    table_number: Option<i64>,
    mut lines: Vec<OrderLine>,
) -> OrderSummary {
    for line in &mut lines {
        line.unit_price = round_currency(line.unit_price);
        line.total_amount = line_total(line.unit_price, line.quantity);
    }
    let payment_due = order_total(lines.iter().map(|l| l.total_amount));

    OrderSummary {
        order_id,
        table_id,
        table_number,
        total_count: lines.len(),
        payment_due,
        order_items: lines,
    }
}

use crate::value_objects::side::Side;
use serde::{Deserialize, Serialize};

/// A single fill handed to a commission model.
///
/// Fields are stored as given. Negative or zero prices and quantities are
/// accepted and flow straight into the formulas.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Transaction {
    pub price: f64,
    pub quantity: f64,
    pub side: Side,
}

impl Transaction {
    pub fn new(price: f64, quantity: f64, side: Side) -> Self {
        Self {
            price,
            quantity,
            side,
        }
    }

    pub fn from_raw(price: f64, quantity: f64, direction: i64) -> Self {
        Self::new(price, quantity, Side::from_code(direction))
    }

    pub fn notional(&self) -> f64 {
        self.price * self.quantity
    }

    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }
}

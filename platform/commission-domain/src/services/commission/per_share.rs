use super::CommissionModel;
use crate::value_objects::transaction::Transaction;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_SHARE_COST: f64 = 0.03;

/// Charges `cost` per unit traded, optionally floored at `min_trade_cost`.
///
/// An absent minimum is different from a minimum of zero: with no floor a
/// negative quantity yields a negative commission.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerShare {
    pub cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_trade_cost: Option<f64>,
}

impl Default for PerShare {
    fn default() -> Self {
        Self {
            cost: DEFAULT_PER_SHARE_COST,
            min_trade_cost: None,
        }
    }
}

impl PerShare {
    pub fn new(cost: f64) -> Self {
        Self {
            cost,
            min_trade_cost: None,
        }
    }

    pub fn with_min_trade_cost(mut self, min_trade_cost: f64) -> Self {
        self.min_trade_cost = Some(min_trade_cost);
        self
    }
}

impl CommissionModel for PerShare {
    fn calculate(&self, transaction: &Transaction) -> f64 {
        let commission = transaction.quantity * self.cost;
        match self.min_trade_cost {
            // NaN passes through instead of being replaced by the floor.
            Some(min) if min > commission => min,
            Some(_) | None => commission,
        }
    }

    fn name(&self) -> &'static str {
        "PerShare"
    }
}

impl std::fmt::Display for PerShare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(cost={:?}, min trade cost=", self.name(), self.cost)?;
        match self.min_trade_cost {
            Some(min) => write!(f, "{min:?})"),
            None => f.write_str("None)"),
        }
    }
}

use super::CommissionModel;
use crate::value_objects::transaction::Transaction;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_TRADE_COST: f64 = 5.0;

/// Flat fee per non-empty fill. A zero quantity is not a trade and costs nothing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerTrade {
    pub cost: f64,
}

impl Default for PerTrade {
    fn default() -> Self {
        Self {
            cost: DEFAULT_PER_TRADE_COST,
        }
    }
}

impl PerTrade {
    pub fn new(cost: f64) -> Self {
        Self { cost }
    }
}

impl CommissionModel for PerTrade {
    fn calculate(&self, transaction: &Transaction) -> f64 {
        if transaction.quantity == 0.0 {
            return 0.0;
        }
        self.cost
    }

    fn name(&self) -> &'static str {
        "PerTrade"
    }
}

impl std::fmt::Display for PerTrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(cost={:?})", self.name(), self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::PerTrade;
    use crate::services::commission::CommissionModel;
    use crate::value_objects::side::Side;
    use crate::value_objects::transaction::Transaction;

    #[test]
    fn empty_fill_is_free() {
        let model = PerTrade::default();
        assert_eq!(model.calculate(&Transaction::new(10.0, 0.0, Side::Buy)), 0.0);
        assert_eq!(model.calculate(&Transaction::new(10.0, -0.0, Side::Sell)), 0.0);
    }

    #[test]
    fn any_other_quantity_pays_flat_fee() {
        let model = PerTrade::new(7.5);
        assert_eq!(model.calculate(&Transaction::new(10.0, 200.0, Side::Sell)), 7.5);
        assert_eq!(model.calculate(&Transaction::new(0.5, 1e-9, Side::Buy)), 7.5);
        assert_eq!(model.calculate(&Transaction::new(10.0, -3.0, Side::Buy)), 7.5);
    }

    #[test]
    fn display_renders_cost() {
        assert_eq!(PerTrade::default().to_string(), "PerTrade(cost=5.0)");
    }
}

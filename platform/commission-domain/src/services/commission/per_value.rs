use super::CommissionModel;
use crate::value_objects::side::Side;
use crate::value_objects::transaction::Transaction;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BUY_COST: f64 = 0.003;
pub const DEFAULT_SELL_COST: f64 = 0.0;

/// Charges a fraction of notional, with separate rates for buys and sells.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerValue {
    pub buy_cost: f64,
    pub sell_cost: f64,
}

impl Default for PerValue {
    fn default() -> Self {
        Self {
            buy_cost: DEFAULT_BUY_COST,
            sell_cost: DEFAULT_SELL_COST,
        }
    }
}

impl PerValue {
    pub fn new(buy_cost: f64, sell_cost: f64) -> Self {
        Self {
            buy_cost,
            sell_cost,
        }
    }

    pub fn rate_for(&self, side: Side) -> f64 {
        match side {
            Side::Buy => self.buy_cost,
            Side::Sell => self.sell_cost,
        }
    }
}

impl CommissionModel for PerValue {
    fn calculate(&self, transaction: &Transaction) -> f64 {
        let cost_per_unit = transaction.price * self.rate_for(transaction.side);
        transaction.quantity * cost_per_unit
    }

    fn name(&self) -> &'static str {
        "PerValue"
    }
}

impl std::fmt::Display for PerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(buy cost={:?}, sell cost={:?})",
            self.name(),
            self.buy_cost,
            self.sell_cost
        )
    }
}

#[cfg(test)]
mod tests {
    use super::PerValue;
    use crate::services::commission::CommissionModel;
    use crate::value_objects::side::Side;
    use crate::value_objects::transaction::Transaction;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn default_charges_buys_only() {
        let model = PerValue::default();
        let buy = Transaction::new(100.0, 50.0, Side::Buy);
        let sell = Transaction::new(100.0, 50.0, Side::Sell);
        assert!(approx(model.calculate(&buy), 15.0));
        assert_eq!(model.calculate(&sell), 0.0);
    }

    #[test]
    fn sell_rate_applies_to_sells() {
        let model = PerValue::new(0.003, 0.001);
        let sell = Transaction::new(100.0, 50.0, Side::Sell);
        assert!(approx(model.calculate(&sell), 5.0));
    }

    #[test]
    fn unrecognized_direction_codes_fall_into_sell() {
        let model = PerValue::new(0.01, 0.02);
        for code in [0, -1, 2, i64::MAX] {
            let tx = Transaction::from_raw(10.0, 10.0, code);
            assert!(approx(model.calculate(&tx), 2.0), "code {code}");
        }
    }

    #[test]
    fn display_renders_both_rates() {
        assert_eq!(
            PerValue::default().to_string(),
            "PerValue(buy cost=0.003, sell cost=0.0)"
        );
    }
}

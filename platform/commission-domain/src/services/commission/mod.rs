//! Commission models for simulated fills.
//!
//! Every model is a frozen set of rates. `calculate` depends only on the
//! transaction passed in, so a model can be shared freely between threads.

mod per_share;
mod per_trade;
mod per_value;
mod schedule;

pub use per_share::PerShare;
pub use per_trade::PerTrade;
pub use per_value::PerValue;
pub use schedule::CommissionSchedule;

use crate::value_objects::transaction::Transaction;
use std::fmt::Debug;

pub trait CommissionModel: Debug + Send + Sync {
    /// Commission owed for `transaction`, in the currency unit of its price.
    fn calculate(&self, transaction: &Transaction) -> f64;

    fn name(&self) -> &'static str;
}

impl<T: CommissionModel + ?Sized> CommissionModel for &T {
    fn calculate(&self, transaction: &Transaction) -> f64 {
        (**self).calculate(transaction)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T: CommissionModel + ?Sized> CommissionModel for Box<T> {
    fn calculate(&self, transaction: &Transaction) -> f64 {
        (**self).calculate(transaction)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Frictionless baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoCommission;

impl CommissionModel for NoCommission {
    fn calculate(&self, _transaction: &Transaction) -> f64 {
        0.0
    }

    fn name(&self) -> &'static str {
        "NoCommission"
    }
}

impl std::fmt::Display for NoCommission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NoCommission()")
    }
}

pub fn total_commission<M: CommissionModel + ?Sized>(model: &M, transactions: &[Transaction]) -> f64 {
    transactions.iter().map(|tx| model.calculate(tx)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::side::Side;

    #[test]
    fn models_are_usable_behind_trait_objects() {
        let models: Vec<Box<dyn CommissionModel>> = vec![
            Box::new(PerShare::default()),
            Box::new(PerTrade::default()),
            Box::new(PerValue::default()),
            Box::new(NoCommission),
        ];
        let tx = Transaction::new(100.0, 10.0, Side::Buy);
        let fees: Vec<f64> = models.iter().map(|m| m.calculate(&tx)).collect();

        assert!((fees[0] - 0.3).abs() < 1e-12);
        assert_eq!(fees[1], 5.0);
        assert!((fees[2] - 3.0).abs() < 1e-12);
        assert_eq!(fees[3], 0.0);
    }

    #[test]
    fn total_commission_sums_each_fill() {
        let model = PerTrade::new(2.5);
        let fills = [
            Transaction::new(10.0, 1.0, Side::Buy),
            Transaction::new(10.0, 0.0, Side::Buy),
            Transaction::new(11.0, 3.0, Side::Sell),
        ];
        assert_eq!(total_commission(&model, &fills), 5.0);
        assert_eq!(total_commission(&model, &[]), 0.0);
    }

    #[test]
    fn models_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PerShare>();
        assert_send_sync::<PerTrade>();
        assert_send_sync::<PerValue>();
        assert_send_sync::<CommissionSchedule>();
        assert_send_sync::<Box<dyn CommissionModel>>();
    }
}

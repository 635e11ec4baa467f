pub mod services;
pub mod value_objects;

pub use services::commission::{
    total_commission, CommissionModel, CommissionSchedule, NoCommission, PerShare, PerTrade,
    PerValue,
};
pub use value_objects::side::Side;
pub use value_objects::transaction::Transaction;

pub mod side;
pub mod transaction;

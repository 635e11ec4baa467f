pub mod config;
pub mod fills;
pub mod quoting;

use super::{CommissionModel, NoCommission, PerShare, PerTrade, PerValue};
use crate::value_objects::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Closed set of commission models, selectable from configuration by the
/// `model` key. Omitted parameters take each model's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum CommissionSchedule {
    PerShare(PerShare),
    PerTrade(PerTrade),
    PerValue(PerValue),
    #[serde(rename = "none")]
    Free,
}

impl Default for CommissionSchedule {
    fn default() -> Self {
        CommissionSchedule::PerShare(PerShare::default())
    }
}

impl CommissionSchedule {
    pub fn label(&self) -> &'static str {
        match self {
            CommissionSchedule::PerShare(_) => "per_share",
            CommissionSchedule::PerTrade(_) => "per_trade",
            CommissionSchedule::PerValue(_) => "per_value",
            CommissionSchedule::Free => "none",
        }
    }

    pub fn parse_label(value: &str) -> Result<Self, String> {
        let normalized = value.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "per_share" | "pershare" => Ok(CommissionSchedule::PerShare(PerShare::default())),
            "per_trade" | "pertrade" => Ok(CommissionSchedule::PerTrade(PerTrade::default())),
            "per_value" | "pervalue" => Ok(CommissionSchedule::PerValue(PerValue::default())),
            "none" | "free" | "zero" => Ok(CommissionSchedule::Free),
            _ => Err(format!("unsupported commission model: {value}")),
        }
    }
}

impl From<PerShare> for CommissionSchedule {
    fn from(model: PerShare) -> Self {
        CommissionSchedule::PerShare(model)
    }
}

impl From<PerTrade> for CommissionSchedule {
    fn from(model: PerTrade) -> Self {
        CommissionSchedule::PerTrade(model)
    }
}

impl From<PerValue> for CommissionSchedule {
    fn from(model: PerValue) -> Self {
        CommissionSchedule::PerValue(model)
    }
}

impl CommissionModel for CommissionSchedule {
    fn calculate(&self, transaction: &Transaction) -> f64 {
        match self {
            CommissionSchedule::PerShare(model) => model.calculate(transaction),
            CommissionSchedule::PerTrade(model) => model.calculate(transaction),
            CommissionSchedule::PerValue(model) => model.calculate(transaction),
            CommissionSchedule::Free => NoCommission.calculate(transaction),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            CommissionSchedule::PerShare(model) => model.name(),
            CommissionSchedule::PerTrade(model) => model.name(),
            CommissionSchedule::PerValue(model) => model.name(),
            CommissionSchedule::Free => NoCommission.name(),
        }
    }
}

impl Display for CommissionSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommissionSchedule::PerShare(model) => Display::fmt(model, f),
            CommissionSchedule::PerTrade(model) => Display::fmt(model, f),
            CommissionSchedule::PerValue(model) => Display::fmt(model, f),
            CommissionSchedule::Free => Display::fmt(&NoCommission, f),
        }
    }
}

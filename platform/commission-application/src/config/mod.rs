use commission_domain::services::commission::CommissionSchedule;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub commission: CommissionSchedule,
    pub log: Option<LogConfig>,
    pub input: Option<InputConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("unsupported log format: {value}")),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    pub fills_csv: Option<String>,
}

impl Config {
    pub fn schedule(&self) -> CommissionSchedule {
        self.commission
    }

    pub fn log_level(&self) -> Option<&str> {
        self.log.as_ref().and_then(|log| log.level.as_deref())
    }

    pub fn log_format(&self) -> LogFormat {
        self.log
            .as_ref()
            .and_then(|log| log.format)
            .unwrap_or_default()
    }

    pub fn fills_csv(&self) -> Option<&str> {
        self.input
            .as_ref()
            .and_then(|input| input.fills_csv.as_deref())
    }
}

pub fn load_config(path: &Path) -> Result<Config, String> {
    let (config, _source) = load_config_with_source(path)?;
    Ok(config)
}

pub fn load_config_with_source(path: &Path) -> Result<(Config, String), String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    let config = parse_config(&contents)
        .map_err(|err| format!("failed to parse TOML {}: {}", path.display(), err))?;
    Ok((config, contents))
}

pub fn parse_config(contents: &str) -> Result<Config, String> {
    toml::from_str(contents).map_err(|err| err.to_string())
}

pub fn to_toml_pretty(config: &Config) -> Result<String, String> {
    toml::to_string_pretty(config)
        .map_err(|err| format!("failed to serialize config as TOML: {err}"))
}

/// Flags rates that are legal but probably unintended. The models accept
/// them as-is, so these never block a run.
pub fn validate_config(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();

    match &config.commission {
        CommissionSchedule::PerShare(model) => {
            check_rate(&mut warnings, "commission.cost", model.cost);
            if let Some(min) = model.min_trade_cost {
                check_rate(&mut warnings, "commission.min_trade_cost", min);
            }
        }
        CommissionSchedule::PerTrade(model) => {
            check_rate(&mut warnings, "commission.cost", model.cost);
        }
        CommissionSchedule::PerValue(model) => {
            check_rate(&mut warnings, "commission.buy_cost", model.buy_cost);
            check_rate(&mut warnings, "commission.sell_cost", model.sell_cost);
            if model.buy_cost >= 1.0 || model.sell_cost >= 1.0 {
                warnings.push(
                    "commission rate of 100% or more of notional (rates are fractions, not bps)"
                        .to_string(),
                );
            }
        }
        CommissionSchedule::Free => {}
    }

    if let Some(level) = config.log_level() {
        if level.trim().is_empty() {
            warnings.push("log.level is empty".to_string());
        }
    }

    warnings
}

fn check_rate(warnings: &mut Vec<String>, label: &str, value: f64) {
    if !value.is_finite() {
        warnings.push(format!("{label} is not finite ({value})"));
    } else if value < 0.0 {
        warnings.push(format!("{label} is negative ({value})"));
    }
}

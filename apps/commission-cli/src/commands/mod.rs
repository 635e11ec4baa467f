use crate::obs;
use commission_application::config::{
    load_config, to_toml_pretty, validate_config, Config, LogFormat,
};
use commission_application::fills::load_fills_csv;
use commission_application::quoting::{
    quote, quote_batch, read_report_json, write_report_json, QuoteReport,
};
use commission_domain::services::commission::{CommissionModel, CommissionSchedule};
use commission_domain::value_objects::side::Side;
use commission_domain::value_objects::transaction::Transaction;
use std::path::{Path, PathBuf};

pub enum Command {
    Quote {
        config: Option<PathBuf>,
        overrides: ModelOverrides,
        price: f64,
        quantity: f64,
        side: String,
        json: bool,
    },
    Batch {
        config: PathBuf,
        input: Option<PathBuf>,
        out: Option<PathBuf>,
        json: bool,
    },
    Validate {
        config: PathBuf,
    },
    Report {
        input: PathBuf,
    },
}

pub struct LogOptions {
    pub level: Option<String>,
    pub format: Option<String>,
    pub metrics_addr: Option<String>,
}

#[derive(Debug, Default)]
pub struct ModelOverrides {
    pub model: Option<String>,
    pub cost: Option<f64>,
    pub min_trade_cost: Option<f64>,
    pub buy_cost: Option<f64>,
    pub sell_cost: Option<f64>,
}

pub fn run(command: Command, log: LogOptions) -> Result<(), String> {
    match command {
        Command::Quote {
            config,
            overrides,
            price,
            quantity,
            side,
            json,
        } => {
            let config = config.as_deref().map(load_config).transpose()?;
            init_observability(config.as_ref(), &log)?;
            run_quote(config.as_ref(), &overrides, price, quantity, &side, json)
        }
        Command::Batch {
            config,
            input,
            out,
            json,
        } => {
            let config = load_config(&config)?;
            init_observability(Some(&config), &log)?;
            run_batch(&config, input, out, json)
        }
        Command::Validate { config: path } => {
            let config = load_config(&path)?;
            init_observability(Some(&config), &log)?;
            run_validate(&path, &config)
        }
        Command::Report { input } => {
            init_observability(None, &log)?;
            run_report(&input)
        }
    }
}

fn init_observability(config: Option<&Config>, log: &LogOptions) -> Result<(), String> {
    let level = log
        .level
        .as_deref()
        .or_else(|| config.and_then(Config::log_level))
        .unwrap_or("info");
    let format = match log.format.as_deref() {
        Some(raw) => LogFormat::parse(raw)?,
        None => config.map(Config::log_format).unwrap_or_default(),
    };
    obs::init_tracing(level, format)?;
    obs::init_metrics(log.metrics_addr.as_deref())?;
    Ok(())
}

/// Picks the model from `--model` (with defaults) or the config, then
/// applies rate flags. A flag the chosen model has no parameter for is an
/// error rather than silently ignored.
pub(crate) fn resolve_schedule(
    config: Option<&Config>,
    overrides: &ModelOverrides,
) -> Result<CommissionSchedule, String> {
    let mut schedule = match overrides.model.as_deref() {
        Some(label) => CommissionSchedule::parse_label(label)?,
        None => config.map(Config::schedule).unwrap_or_default(),
    };

    let label = schedule.label();
    let reject = |flag: &str| format!("{flag} does not apply to model {label}");

    match &mut schedule {
        CommissionSchedule::PerShare(model) => {
            if let Some(cost) = overrides.cost {
                model.cost = cost;
            }
            if let Some(min) = overrides.min_trade_cost {
                model.min_trade_cost = Some(min);
            }
            if overrides.buy_cost.is_some() || overrides.sell_cost.is_some() {
                return Err(reject("--buy-cost/--sell-cost"));
            }
        }
        CommissionSchedule::PerTrade(model) => {
            if let Some(cost) = overrides.cost {
                model.cost = cost;
            }
            if overrides.min_trade_cost.is_some() {
                return Err(reject("--min-trade-cost"));
            }
            if overrides.buy_cost.is_some() || overrides.sell_cost.is_some() {
                return Err(reject("--buy-cost/--sell-cost"));
            }
        }
        CommissionSchedule::PerValue(model) => {
            if let Some(buy) = overrides.buy_cost {
                model.buy_cost = buy;
            }
            if let Some(sell) = overrides.sell_cost {
                model.sell_cost = sell;
            }
            if overrides.cost.is_some() {
                return Err(reject("--cost"));
            }
            if overrides.min_trade_cost.is_some() {
                return Err(reject("--min-trade-cost"));
            }
        }
        CommissionSchedule::Free => {
            if overrides.cost.is_some()
                || overrides.min_trade_cost.is_some()
                || overrides.buy_cost.is_some()
                || overrides.sell_cost.is_some()
            {
                return Err(reject("rate flags"));
            }
        }
    }

    Ok(schedule)
}

fn run_quote(
    config: Option<&Config>,
    overrides: &ModelOverrides,
    price: f64,
    quantity: f64,
    side: &str,
    json: bool,
) -> Result<(), String> {
    let schedule = resolve_schedule(config, overrides)?;
    let side = Side::parse(side)?;
    let quoted = quote(&schedule, &Transaction::new(price, quantity, side));

    if json {
        let line = serde_json::to_string(&quoted)
            .map_err(|err| format!("failed to serialize quote: {err}"))?;
        println!("{line}");
    } else {
        println!("model: {schedule}");
        println!(
            "fill: price={}, quantity={}, side={} ({}), notional={}",
            quoted.price,
            quoted.quantity,
            quoted.side,
            quoted.side.code(),
            quoted.notional
        );
        println!("commission: {}", quoted.commission);
    }
    Ok(())
}

fn run_batch(
    config: &Config,
    input: Option<PathBuf>,
    out: Option<PathBuf>,
    json: bool,
) -> Result<(), String> {
    let input = input
        .or_else(|| config.fills_csv().map(PathBuf::from))
        .ok_or_else(|| "no fills CSV: pass --input or set [input].fills_csv".to_string())?;
    let fills = load_fills_csv(&input)?;
    let schedule = config.schedule();
    let report = quote_batch(&schedule, &fills);

    if let Some(out_path) = &out {
        write_report_json(out_path, &report)?;
        tracing::info!(path = %out_path.display(), "report written");
    }

    if json {
        let line = serde_json::to_string(&report)
            .map_err(|err| format!("failed to serialize report: {err}"))?;
        println!("{line}");
    } else {
        print_report(&input, &report);
    }
    Ok(())
}

fn print_report(input: &Path, report: &QuoteReport) {
    println!("model: {}", report.model);
    println!("input: {} ({} fills)", input.display(), report.fills);
    print_quotes(report);
}

fn print_quotes(report: &QuoteReport) {
    println!("buys: {}, sells: {}", report.buys, report.sells);
    for (idx, q) in report.quotes.iter().enumerate() {
        println!(
            "{:>6}  {:<4}  price={:<12} quantity={:<12} notional={:<14} commission={}",
            idx + 1,
            q.side.as_str(),
            q.price,
            q.quantity,
            q.notional,
            q.commission
        );
    }
    println!("total commission: {}", report.total_commission);
}

fn run_validate(path: &Path, config: &Config) -> Result<(), String> {
    let schedule = config.schedule();
    println!("config: {}", path.display());
    println!("model: {} ({})", schedule, schedule.name());
    if let Some(fills) = config.fills_csv() {
        println!("input: {fills}");
    }

    let warnings = validate_config(config);
    for warning in &warnings {
        tracing::warn!(%warning, "config warning");
        println!("warning: {warning}");
    }
    if warnings.is_empty() {
        println!("config ok");
    }

    println!("resolved config:\n{}", to_toml_pretty(config)?);
    Ok(())
}

fn run_report(input: &Path) -> Result<(), String> {
    let report = read_report_json(input)?;
    println!("model: {}", report.model);
    println!("report: {} ({} fills)", input.display(), report.fills);
    print_quotes(&report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{resolve_schedule, ModelOverrides};
    use commission_application::config::parse_config;
    use commission_domain::services::commission::{
        CommissionSchedule, PerShare, PerTrade, PerValue,
    };

    #[test]
    fn defaults_to_per_share_without_config_or_model() {
        let schedule = resolve_schedule(None, &ModelOverrides::default()).expect("resolve");
        assert_eq!(schedule, CommissionSchedule::PerShare(PerShare::default()));
    }

    #[test]
    fn model_flag_replaces_config_model() {
        let config = parse_config("[commission]\nmodel = \"per_value\"\n").expect("parse");
        let overrides = ModelOverrides {
            model: Some("per_trade".to_string()),
            cost: Some(1.5),
            ..ModelOverrides::default()
        };
        let schedule = resolve_schedule(Some(&config), &overrides).expect("resolve");
        assert_eq!(schedule, CommissionSchedule::PerTrade(PerTrade::new(1.5)));
    }

    #[test]
    fn rate_flags_override_config_rates() {
        let config = parse_config(
            "[commission]\nmodel = \"per_value\"\nbuy_cost = 0.002\nsell_cost = 0.002\n",
        )
        .expect("parse");
        let overrides = ModelOverrides {
            sell_cost: Some(0.0005),
            ..ModelOverrides::default()
        };
        let schedule = resolve_schedule(Some(&config), &overrides).expect("resolve");
        assert_eq!(schedule, CommissionSchedule::PerValue(PerValue::new(0.002, 0.0005)));
    }

    #[test]
    fn min_trade_cost_sets_floor_on_per_share() {
        let overrides = ModelOverrides {
            model: Some("per_share".to_string()),
            min_trade_cost: Some(5.0),
            ..ModelOverrides::default()
        };
        let schedule = resolve_schedule(None, &overrides).expect("resolve");
        assert_eq!(
            schedule,
            CommissionSchedule::PerShare(PerShare::default().with_min_trade_cost(5.0))
        );
    }

    #[test]
    fn flags_for_other_models_are_rejected() {
        let overrides = ModelOverrides {
            model: Some("per_trade".to_string()),
            min_trade_cost: Some(1.0),
            ..ModelOverrides::default()
        };
        let err = resolve_schedule(None, &overrides).expect_err("per_trade has no floor");
        assert!(err.contains("--min-trade-cost does not apply to model per_trade"));
    }

    #[test]
    fn unknown_model_label_is_an_error() {
        let overrides = ModelOverrides {
            model: Some("tiered".to_string()),
            ..ModelOverrides::default()
        };
        let err = resolve_schedule(None, &overrides).expect_err("unknown model");
        assert!(err.contains("unsupported commission model"));
    }
}

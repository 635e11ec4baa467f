mod commands;
mod obs;

use clap::{Parser, Subcommand};
use commands::{Command, LogOptions, ModelOverrides};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "commission")]
#[command(about = "Commission quoting for simulated fills", version, arg_required_else_help = true)]
#[command(
    after_help = "Examples:\n  commission quote --model per_share --cost 0.03 --min-trade-cost 5 --price 10 --quantity 100 --side buy\n  commission batch --config configs/commission.toml --input fills.csv --out report.json\n  commission validate --config configs/commission.toml\n  commission report --input report.json\n"
)]
struct Cli {
    /// Log filter (overridden by COMMISSION_LOG). Defaults to [log].level or `info`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format: pretty | json.
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Prometheus metrics listen addr (e.g. 127.0.0.1:9898). Optional.
    #[arg(long, global = true)]
    metrics_addr: Option<String>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Price a single fill.
    Quote {
        #[arg(long)]
        config: Option<PathBuf>,
        /// Commission model: per_share | per_trade | per_value | none.
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        cost: Option<f64>,
        #[arg(long)]
        min_trade_cost: Option<f64>,
        #[arg(long)]
        buy_cost: Option<f64>,
        #[arg(long)]
        sell_cost: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        price: f64,
        #[arg(long, allow_hyphen_values = true)]
        quantity: f64,
        /// buy | sell, or a raw direction code (1 = buy, anything else = sell).
        #[arg(long, allow_hyphen_values = true)]
        side: String,
        /// Print a single JSON line instead of human output.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Price every fill in a CSV (columns: price,quantity,side).
    Batch {
        #[arg(long)]
        config: PathBuf,
        /// Fills CSV; defaults to [input].fills_csv.
        #[arg(long)]
        input: Option<PathBuf>,
        /// Write the JSON report here.
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Load a config and report questionable rates.
    Validate {
        #[arg(long)]
        config: PathBuf,
    },
    /// Print a JSON report written by `batch --out`.
    Report {
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let log = LogOptions {
        level: cli.log_level,
        format: cli.log_format,
        metrics_addr: cli.metrics_addr,
    };
    let command = match cli.command {
        CliCommand::Quote {
            config,
            model,
            cost,
            min_trade_cost,
            buy_cost,
            sell_cost,
            price,
            quantity,
            side,
            json,
        } => Command::Quote {
            config,
            overrides: ModelOverrides {
                model,
                cost,
                min_trade_cost,
                buy_cost,
                sell_cost,
            },
            price,
            quantity,
            side,
            json,
        },
        CliCommand::Batch {
            config,
            input,
            out,
            json,
        } => Command::Batch {
            config,
            input,
            out,
            json,
        },
        CliCommand::Validate { config } => Command::Validate { config },
        CliCommand::Report { input } => Command::Report { input },
    };

    if let Err(err) = commands::run(command, log) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

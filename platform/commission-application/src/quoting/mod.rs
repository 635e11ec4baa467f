use commission_domain::services::commission::CommissionModel;
use commission_domain::value_objects::side::Side;
use commission_domain::value_objects::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Quote {
    pub price: f64,
    pub quantity: f64,
    pub side: Side,
    pub notional: f64,
    pub commission: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuoteReport {
    pub model: String,
    pub fills: usize,
    pub buys: usize,
    pub sells: usize,
    pub total_commission: f64,
    pub quotes: Vec<Quote>,
}

pub fn quote<M>(model: &M, transaction: &Transaction) -> Quote
where
    M: CommissionModel + ?Sized,
{
    let commission = model.calculate(transaction);
    metrics::counter!("commission.app.quotes_total", "model" => model.name()).increment(1);
    tracing::debug!(
        model = model.name(),
        price = transaction.price,
        quantity = transaction.quantity,
        side = %transaction.side,
        commission,
        "quoted fill"
    );
    Quote {
        price: transaction.price,
        quantity: transaction.quantity,
        side: transaction.side,
        notional: transaction.notional(),
        commission,
    }
}

pub fn quote_batch<M>(model: &M, transactions: &[Transaction]) -> QuoteReport
where
    M: CommissionModel + Display + ?Sized,
{
    let start = Instant::now();
    let span = tracing::info_span!("quote_batch", model = model.name(), fills = transactions.len());
    let _guard = span.enter();

    let quotes: Vec<Quote> = transactions.iter().map(|tx| quote(model, tx)).collect();
    let total_commission: f64 = quotes.iter().map(|q| q.commission).sum();
    let buys = transactions.iter().filter(|tx| tx.is_buy()).count();

    metrics::histogram!("commission.app.batch_ms", "model" => model.name())
        .record(start.elapsed().as_secs_f64() * 1000.0);
    tracing::info!(total_commission, "batch quoted");

    QuoteReport {
        model: model.to_string(),
        fills: quotes.len(),
        buys,
        sells: quotes.len() - buys,
        total_commission,
        quotes,
    }
}

pub fn write_report_json(path: &Path, report: &QuoteReport) -> Result<(), String> {
    let payload = serde_json::to_string_pretty(report)
        .map_err(|err| format!("failed to serialize report: {err}"))?;
    fs::write(path, payload)
        .map_err(|err| format!("failed to write report {}: {}", path.display(), err))
}

pub fn read_report_json(path: &Path) -> Result<QuoteReport, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read report {}: {}", path.display(), err))?;
    serde_json::from_str(&contents)
        .map_err(|err| format!("failed to parse report {}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::{quote, quote_batch};
    use commission_domain::services::commission::{CommissionSchedule, PerTrade};
    use commission_domain::value_objects::side::Side;
    use commission_domain::value_objects::transaction::Transaction;

    #[test]
    fn quote_copies_fill_and_commission() {
        let q = quote(&PerTrade::new(5.0), &Transaction::new(10.0, 200.0, Side::Sell));
        assert_eq!(q.price, 10.0);
        assert_eq!(q.quantity, 200.0);
        assert_eq!(q.side, Side::Sell);
        assert_eq!(q.notional, 2000.0);
        assert_eq!(q.commission, 5.0);
    }

    #[test]
    fn batch_totals_quotes_and_names_model() {
        let model = CommissionSchedule::PerTrade(PerTrade::new(2.0));
        let fills = [
            Transaction::new(10.0, 1.0, Side::Buy),
            Transaction::new(10.0, 0.0, Side::Sell),
            Transaction::new(10.0, 4.0, Side::Sell),
        ];
        let report = quote_batch(&model, &fills);
        assert_eq!(report.model, "PerTrade(cost=2.0)");
        assert_eq!(report.fills, 3);
        assert_eq!(report.buys, 1);
        assert_eq!(report.sells, 2);
        assert_eq!(report.total_commission, 4.0);
        assert_eq!(report.quotes[1].commission, 0.0);
    }

    #[test]
    fn empty_batch_costs_nothing() {
        let report = quote_batch(&CommissionSchedule::default(), &[]);
        assert_eq!(report.fills, 0);
        assert_eq!(report.total_commission, 0.0);
        assert!(report.quotes.is_empty());
    }
}

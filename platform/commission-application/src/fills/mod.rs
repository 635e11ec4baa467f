use commission_domain::value_objects::side::Side;
use commission_domain::value_objects::transaction::Transaction;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One CSV row as emitted by the execution source. `side` is kept raw so
/// both `buy`/`sell` labels and integer direction codes are accepted.
#[derive(Debug, Deserialize)]
struct FillRecord {
    price: f64,
    quantity: f64,
    side: String,
}

pub fn load_fills_csv(path: &Path) -> Result<Vec<Transaction>, String> {
    let file = File::open(path)
        .map_err(|err| format!("failed to open fills CSV {}: {}", path.display(), err))?;
    let fills = read_fills(file)?;
    tracing::debug!(path = %path.display(), fills = fills.len(), "loaded fills");
    Ok(fills)
}

pub fn read_fills<R: Read>(reader: R) -> Result<Vec<Transaction>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut fills = Vec::new();
    for (idx, result) in reader.deserialize::<FillRecord>().enumerate() {
        let row = idx + 1;
        let record = result.map_err(|err| format!("failed to parse CSV row {row}: {err}"))?;
        let side = Side::parse(&record.side).map_err(|err| format!("CSV row {row}: {err}"))?;
        fills.push(Transaction::new(record.price, record.quantity, side));
    }
    Ok(fills)
}

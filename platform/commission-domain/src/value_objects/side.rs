use serde::{Deserialize, Serialize};

/// Direction of a fill.
///
/// Upstream execution sources usually encode this as an integer where `1`
/// means buy. Anything else is a sell, including codes that are neither
/// `1` nor `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn from_code(code: i64) -> Self {
        if code == 1 {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Side::Buy => 1,
            Side::Sell => -1,
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "buy" | "b" => Ok(Side::Buy),
            "sell" | "s" => Ok(Side::Sell),
            other => {
                if let Ok(code) = other.parse::<i64>() {
                    return Ok(Side::from_code(code));
                }
                // Codes exported as floats, e.g. `1.0`.
                other
                    .parse::<f64>()
                    .map(|code| if code == 1.0 { Side::Buy } else { Side::Sell })
                    .map_err(|_| format!("unsupported side: {value}"))
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Side::parse(s)
    }
}

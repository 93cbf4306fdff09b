use serde::{Deserialize, Serialize};

/// 수신한 종가 관측치 (POST /api/price 본문)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceObservation {
    pub symbol: String,
    pub close: f64,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub raw: Option<serde_json::Value>,
}

impl PriceObservation {
    pub fn new(symbol: impl Into<String>, close: f64) -> Self {
        PriceObservation {
            symbol: symbol.into(),
            close,
            timestamp: None,
            raw: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = Some(raw);
        self
    }
}

/**
* filename : signal_types
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::indicators::IndicatorSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
  Buy,
  Sell,
  Wait,
}

impl Signal {
  pub fn as_str(&self) -> &'static str {
    match self {
      Signal::Buy => "BUY",
      Signal::Sell => "SELL",
      Signal::Wait => "WAIT",
    }
  }

  // 집계 점수 -> 신호
  pub fn from_score(score: i32) -> Self {
    match score {
      s if s >= 1 => Signal::Buy,
      s if s <= -1 => Signal::Sell,
      _ => Signal::Wait,
    }
  }
}

impl fmt::Display for Signal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// 규칙별 사유 문구
pub const REASON_RSI_OVERSOLD: &str = "RSI < 30 (oversold)";
pub const REASON_RSI_OVERBOUGHT: &str = "RSI > 70 (overbought)";
pub const REASON_MACD_BULLISH: &str = "MACD > Signal (bullish)";
pub const REASON_MACD_BEARISH: &str = "MACD < Signal (bearish)";
pub const REASON_BELOW_LOWER_BAND: &str = "price < Bollinger Lower";
pub const REASON_ABOVE_UPPER_BAND: &str = "price > Bollinger Upper";
pub const REASON_ABOVE_EMA: &str = "price > EMA(20)";
pub const REASON_BELOW_EMA: &str = "price < EMA(20)";
pub const REASON_INSUFFICIENT_DATA: &str = "insufficient data";
pub const REASON_NOT_ENOUGH_CANDLES: &str = "not enough candles";

/// 분류 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
  pub signal: Signal,
  pub reasons: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub details: Option<IndicatorSnapshot>,
}

impl SignalRecord {
  pub fn insufficient_data() -> Self {
    SignalRecord {
      signal: Signal::Wait,
      reasons: vec![REASON_INSUFFICIENT_DATA.to_string()],
      details: None,
    }
  }

  pub fn price(&self) -> Option<f64> {
    self.details.as_ref().map(|d| d.price)
  }
}

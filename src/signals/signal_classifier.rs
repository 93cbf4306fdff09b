/**
* filename : signal_classifier
* author : HAMA
* date: 2025. 5. 12.
* description: 지표 스냅샷 -> 사유 목록 -> BUY/SELL/WAIT
**/

use crate::indicators::{IndicatorEngine, IndicatorSnapshot};
use super::signal_types::*;

const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;

/// 매수 방향 키워드 (소문자 부분 문자열 비교)
pub const BULLISH_KEYWORDS: [&str; 4] = ["oversold", "bullish", "price < bollinger lower", "price > ema"];
/// 매도 방향 키워드
pub const BEARISH_KEYWORDS: [&str; 4] = ["bearish", "price > bollinger upper", "overbought", "price < ema"];

#[derive(Debug, Clone, Default)]
pub struct SignalClassifier {
  engine: IndicatorEngine,
}

impl SignalClassifier {
  pub fn new(engine: IndicatorEngine) -> Self {
    SignalClassifier { engine }
  }

  /// 종가 시퀀스 분류. 3개 미만이면 "insufficient data" WAIT.
  pub fn classify(&self, closes: &[f64]) -> SignalRecord {
    match self.engine.snapshot(closes) {
      Ok(snapshot) => self.classify_snapshot(snapshot),
      Err(e) => {
        log::debug!("classification skipped: {}", e);
        SignalRecord::insufficient_data()
      }
    }
  }

  pub fn classify_snapshot(&self, snapshot: IndicatorSnapshot) -> SignalRecord {
    let reasons = evaluate_rules(&snapshot);
    let signal = Signal::from_score(aggregate_score(&reasons));

    SignalRecord {
      signal,
      reasons,
      details: Some(snapshot),
    }
  }
}

/// 고정된 순서(RSI, MACD, 볼린저, EMA)로 규칙을 적용한다. 값이 없는 규칙은 건너뛴다.
pub fn evaluate_rules(snapshot: &IndicatorSnapshot) -> Vec<String> {
  let price = snapshot.price;
  let mut reasons = Vec::new();

  if let Some(rsi) = snapshot.rsi {
    if rsi < RSI_OVERSOLD {
      reasons.push(REASON_RSI_OVERSOLD.to_string());
    } else if rsi > RSI_OVERBOUGHT {
      reasons.push(REASON_RSI_OVERBOUGHT.to_string());
    }
  }

  if let (Some(line), Some(signal)) = (snapshot.macd, snapshot.macd_signal) {
    if line > signal {
      reasons.push(REASON_MACD_BULLISH.to_string());
    } else if line < signal {
      reasons.push(REASON_MACD_BEARISH.to_string());
    }
  }

  if let (Some(lower), Some(upper)) = (snapshot.boll_lower, snapshot.boll_upper) {
    if price < lower {
      reasons.push(REASON_BELOW_LOWER_BAND.to_string());
    } else if price > upper {
      reasons.push(REASON_ABOVE_UPPER_BAND.to_string());
    }
  }

  if let Some(ema20) = snapshot.ema20 {
    if price > ema20 {
      reasons.push(REASON_ABOVE_EMA.to_string());
    } else if price < ema20 {
      reasons.push(REASON_BELOW_EMA.to_string());
    }
  }

  reasons
}

/// 사유 목록 점수화.
///
/// 매수 키워드에 걸린 사유만 점수에 반영된다: 매도 키워드도 함께 포함하면 -1, 아니면 +1.
/// 매도 키워드만 포함한 사유는 감점되지 않는다. 현재 문구로는 두 집합에 동시에
/// 걸리는 사유가 없으므로 점수는 음수가 될 수 없고 SELL 은 나오지 않는다.
pub fn aggregate_score(reasons: &[String]) -> i32 {
  let mut score = 0;
  for reason in reasons {
    let lower = reason.to_lowercase();
    if matches_any(&lower, &BULLISH_KEYWORDS) {
      if matches_any(&lower, &BEARISH_KEYWORDS) {
        score -= 1;
      } else {
        score += 1;
      }
    }
  }
  score
}

fn matches_any(text: &str, keywords: &[&str]) -> bool {
  keywords.iter().any(|k| text.contains(k))
}

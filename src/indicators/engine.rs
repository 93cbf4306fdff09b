/**
* filename : engine
* author : HAMA
* date: 2025. 5. 12.
* description: 스냅샷 기반 지표 일괄 계산
**/

use serde::{Deserialize, Serialize};
use crate::error::SignalError;
use super::{BollingerBands, ExponentialMovingAverage, Indicator, MACD, RelativeStrengthIndex};

/// 엔진을 적용하기 위한 최소 데이터 수
pub const MIN_ENGINE_POINTS: usize = 3;

/// 마지막 시점의 지표 값. 계산에 실패한 지표는 `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
  pub rsi: Option<f64>,
  pub macd: Option<f64>,
  pub macd_signal: Option<f64>,
  pub boll_lower: Option<f64>,
  pub boll_upper: Option<f64>,
  pub ema20: Option<f64>,
  pub price: f64,
}

#[derive(Debug, Clone)]
pub struct IndicatorEngine {
  rsi: RelativeStrengthIndex,
  macd: MACD,
  bollinger: BollingerBands,
  ema: ExponentialMovingAverage,
}

impl Default for IndicatorEngine {
  fn default() -> Self {
    IndicatorEngine {
      rsi: RelativeStrengthIndex::new(14),
      macd: MACD::new(12, 26, 9),
      bollinger: BollingerBands::new(20, 2.0),
      ema: ExponentialMovingAverage::new(20),
    }
  }
}

impl IndicatorEngine {
  pub fn new() -> Self {
    Self::default()
  }

  /// 시퀀스 전체로 지표를 계산하고 마지막 값만 모은다.
  ///
  /// 3개 미만이면 `InsufficientData`. 개별 지표 실패는 해당 필드만 `None`으로 남긴다.
  pub fn snapshot(&self, closes: &[f64]) -> Result<IndicatorSnapshot, SignalError> {
    if closes.len() < MIN_ENGINE_POINTS {
      return Err(SignalError::InsufficientData);
    }
    let price = match closes.last() {
      Some(p) => *p,
      None => return Err(SignalError::InsufficientData),
    };

    let rsi = last_value(&self.rsi, self.rsi.calculate(closes));

    let (macd, macd_signal) = match self.macd.calculate(closes) {
      Ok(series) => (finite(series.last_line()), finite(series.last_signal())),
      Err(e) => {
        log::debug!("{} unavailable: {}", self.macd.name(), e);
        (None, None)
      }
    };

    let (boll_lower, boll_upper) = match self.bollinger.calculate(closes) {
      Ok(bands) => (finite(bands.lower.last().copied()), finite(bands.upper.last().copied())),
      Err(e) => {
        log::debug!("{} unavailable: {}", self.bollinger.name(), e);
        (None, None)
      }
    };

    let ema20 = last_value(&self.ema, self.ema.calculate(closes));

    Ok(IndicatorSnapshot {
      rsi,
      macd,
      macd_signal,
      boll_lower,
      boll_upper,
      ema20,
      price,
    })
  }
}

fn last_value<I: Indicator>(indicator: &I, result: Result<Vec<f64>, SignalError>) -> Option<f64> {
  match result {
    Ok(values) => finite(values.last().copied()),
    Err(e) => {
      log::debug!("{} unavailable: {}", indicator.name(), e);
      None
    }
  }
}

// NaN/inf 는 비교 규칙에서 어떤 조건도 만족하지 않으므로 값 없음으로 취급
fn finite(value: Option<f64>) -> Option<f64> {
  value.filter(|v| v.is_finite())
}

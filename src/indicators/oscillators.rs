/**
* filename : oscillators
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::error::SignalError;
use super::Indicator;
use super::moving_averages::exponential_smoothing;

/// 평균 하락폭이 0일 때 분모 보호용
const RSI_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone)]
pub struct RelativeStrengthIndex {
  name: String,
  period: usize,
}

impl RelativeStrengthIndex {
  pub fn new(period: usize) -> Self {
    RelativeStrengthIndex {
      name: format!("RSI-{}", period),
      period,
    }
  }

  pub fn period(&self) -> usize {
    self.period
  }
}

impl Default for RelativeStrengthIndex {
  fn default() -> Self {
    RelativeStrengthIndex::new(14)
  }
}

impl Indicator for RelativeStrengthIndex {
  type Output = Vec<f64>;

  fn name(&self) -> &str {
    &self.name
  }

  fn required_points(&self) -> usize {
    2
  }

  /// 두 번째 가격부터의 RSI 값을 반환한다 (길이 = 입력 길이 - 1).
  fn calculate(&self, closes: &[f64]) -> Result<Vec<f64>, SignalError> {
    if self.period == 0 {
      return Err(SignalError::InvalidParameter("RSI period must be positive".to_string()));
    }
    if closes.len() < self.required_points() {
      return Err(SignalError::InsufficientData);
    }

    // 상승폭 / 하락폭 분리
    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
      .windows(2)
      .map(|w| {
        let change = w[1] - w[0];
        (change.max(0.0), (-change).max(0.0))
      })
      .unzip();

    // center of mass = period - 1  =>  alpha = 1 / period
    let alpha = 1.0 / self.period as f64;
    let avg_gain = exponential_smoothing(&gains, alpha)?;
    let avg_loss = exponential_smoothing(&losses, alpha)?;

    let values = avg_gain
      .iter()
      .zip(avg_loss.iter())
      .map(|(gain, loss)| {
        let rs = gain / (loss + RSI_EPSILON);
        100.0 - (100.0 / (1.0 + rs))
      })
      .collect();

    Ok(values)
  }
}

/**
* filename : moving_averages
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::error::SignalError;
use super::Indicator;

/// 보정 없는(adjust=false) 지수 이동 평균 재귀식.
///
/// `v[0] = x[0]`, `v[t] = alpha * x[t] + (1 - alpha) * v[t-1]`.
/// 직전 값과 입력이 같으면 직전 값을 그대로 유지하므로 상수 시퀀스는 오차 없이 상수로 남는다.
pub fn exponential_smoothing(values: &[f64], alpha: f64) -> Result<Vec<f64>, SignalError> {
  if !(alpha > 0.0 && alpha <= 1.0) {
    return Err(SignalError::InvalidParameter(format!("smoothing factor out of range: {}", alpha)));
  }

  let first = match values.first() {
    Some(v) => *v,
    None => return Err(SignalError::InsufficientData),
  };

  let mut out = Vec::with_capacity(values.len());
  let mut current = first;
  out.push(current);

  for &x in &values[1..] {
    if current != x {
      current = alpha * x + (1.0 - alpha) * current;
    }
    out.push(current);
  }

  Ok(out)
}

/// span 기준 EMA (alpha = 2 / (span + 1))
pub fn ema(values: &[f64], span: usize) -> Result<Vec<f64>, SignalError> {
  if span == 0 {
    return Err(SignalError::InvalidParameter("EMA span must be positive".to_string()));
  }
  exponential_smoothing(values, 2.0 / (span as f64 + 1.0))
}

#[derive(Debug, Clone)]
pub struct ExponentialMovingAverage {
  name: String,
  span: usize,
}

impl ExponentialMovingAverage {
  pub fn new(span: usize) -> Self {
    ExponentialMovingAverage {
      name: format!("EMA-{}", span),
      span,
    }
  }

  pub fn span(&self) -> usize {
    self.span
  }

  pub fn alpha(&self) -> f64 {
    2.0 / (self.span as f64 + 1.0)
  }
}

impl Indicator for ExponentialMovingAverage {
  type Output = Vec<f64>;

  fn name(&self) -> &str {
    &self.name
  }

  // 워밍업 없이 첫 값부터 정의된다
  fn required_points(&self) -> usize {
    1
  }

  fn calculate(&self, closes: &[f64]) -> Result<Vec<f64>, SignalError> {
    ema(closes, self.span)
  }
}

/**
* filename : volatility
* author : HAMA
* date: 2025. 5. 12.
* description: 볼린저 밴드
**/

use statrs::statistics::Statistics;
use crate::error::SignalError;
use super::Indicator;

#[derive(Debug, Clone, PartialEq)]
pub struct BandSeries {
  pub lower: Vec<f64>,
  pub mid: Vec<f64>,
  pub upper: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct BollingerBands {
  name: String,
  window: usize,
  std_multiplier: f64,
}

impl BollingerBands {
  pub fn new(window: usize, std_multiplier: f64) -> Self {
    BollingerBands {
      name: format!("BB-{}-{}", window, std_multiplier),
      window,
      std_multiplier,
    }
  }
}

impl Default for BollingerBands {
  fn default() -> Self {
    BollingerBands::new(20, 2.0)
  }
}

impl Indicator for BollingerBands {
  type Output = BandSeries;

  fn name(&self) -> &str {
    &self.name
  }

  // 시작 구간은 window보다 짧은 창을 허용 (최소 1개)
  fn required_points(&self) -> usize {
    1
  }

  fn calculate(&self, closes: &[f64]) -> Result<BandSeries, SignalError> {
    if self.window == 0 {
      return Err(SignalError::InvalidParameter("Bollinger window must be positive".to_string()));
    }
    if !(self.std_multiplier.is_finite() && self.std_multiplier > 0.0) {
      return Err(SignalError::InvalidParameter(format!("invalid std multiplier: {}", self.std_multiplier)));
    }
    if closes.is_empty() {
      return Err(SignalError::InsufficientData);
    }

    let mut bands = BandSeries {
      lower: Vec::with_capacity(closes.len()),
      mid: Vec::with_capacity(closes.len()),
      upper: Vec::with_capacity(closes.len()),
    };

    for end in 0..closes.len() {
      let start = (end + 1).saturating_sub(self.window);
      let window = &closes[start..=end];

      let mid = window.iter().mean();
      // 표본 표준편차 (n - 1), 점이 하나뿐이면 0
      let std = if window.len() > 1 { window.iter().std_dev() } else { 0.0 };

      bands.mid.push(mid);
      bands.upper.push(mid + self.std_multiplier * std);
      bands.lower.push(mid - self.std_multiplier * std);
    }

    Ok(bands)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_bollinger_constant_series_collapses() {
    let bands = BollingerBands::default().calculate(&[100.0; 5]).unwrap();
    assert_eq!(bands.lower.last(), Some(&100.0));
    assert_eq!(bands.mid.last(), Some(&100.0));
    assert_eq!(bands.upper.last(), Some(&100.0));
  }

  #[test]
  fn test_bollinger_single_point_has_zero_width() {
    let bands = BollingerBands::default().calculate(&[7.0]).unwrap();
    assert_eq!(bands.lower, vec![7.0]);
    assert_eq!(bands.upper, vec![7.0]);
  }

  #[test]
  fn test_bollinger_partial_window_uses_sample_std() {
    // [1, 2, 3]: mean 2, sample std 1
    let bands = BollingerBands::default().calculate(&[1.0, 2.0, 3.0]).unwrap();
    assert!((bands.mid[2] - 2.0).abs() < 1e-12);
    assert!((bands.upper[2] - 4.0).abs() < 1e-12);
    assert!((bands.lower[2] - 0.0).abs() < 1e-12);
  }

  #[test]
  fn test_bollinger_window_trails() {
    // window 2: 마지막 창은 [3, 5]
    let bands = BollingerBands::new(2, 2.0).calculate(&[100.0, 3.0, 5.0]).unwrap();
    assert!((bands.mid[2] - 4.0).abs() < 1e-12);
    let std = 2.0_f64.sqrt();
    assert!((bands.upper[2] - (4.0 + 2.0 * std)).abs() < 1e-9);
  }

  #[test]
  fn test_bollinger_invalid_parameters() {
    assert!(BollingerBands::new(0, 2.0).calculate(&[1.0]).is_err());
    assert!(BollingerBands::new(20, -1.0).calculate(&[1.0]).is_err());
    assert!(BollingerBands::default().calculate(&[]).is_err());
  }
}

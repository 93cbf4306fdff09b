/**
* filename : trend
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use crate::error::SignalError;
use super::Indicator;
use super::moving_averages::ema;

/// MACD 라인 / 시그널 라인 / 히스토그램 (입력과 같은 길이)
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
  pub line: Vec<f64>,
  pub signal: Vec<f64>,
  pub histogram: Vec<f64>,
}

impl MacdSeries {
  pub fn last_line(&self) -> Option<f64> {
    self.line.last().copied()
  }

  pub fn last_signal(&self) -> Option<f64> {
    self.signal.last().copied()
  }

  pub fn last_histogram(&self) -> Option<f64> {
    self.histogram.last().copied()
  }
}

#[derive(Debug, Clone)]
pub struct MACD {
  name: String,
  fast_period: usize,
  slow_period: usize,
  signal_period: usize,
}

impl MACD {
  pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
    MACD {
      name: format!("MACD-{}-{}-{}", fast_period, slow_period, signal_period),
      fast_period,
      slow_period,
      signal_period,
    }
  }
}

impl Default for MACD {
  fn default() -> Self {
    MACD::new(12, 26, 9)
  }
}

impl Indicator for MACD {
  type Output = MacdSeries;

  fn name(&self) -> &str {
    &self.name
  }

  fn required_points(&self) -> usize {
    1
  }

  fn calculate(&self, closes: &[f64]) -> Result<MacdSeries, SignalError> {
    let fast = ema(closes, self.fast_period)?;
    let slow = ema(closes, self.slow_period)?;

    // 빠른 EMA - 느린 EMA
    let line: Vec<f64> = fast.iter().zip(slow.iter()).map(|(f, s)| f - s).collect();
    let signal = ema(&line, self.signal_period)?;
    let histogram = line.iter().zip(signal.iter()).map(|(l, s)| l - s).collect();

    Ok(MacdSeries { line, signal, histogram })
  }
}

/**
* filename : mod
* author : HAMA
* date: 2025. 5. 11.
* description:
**/
pub mod moving_averages;
pub mod oscillators;
pub mod trend;
pub mod volatility;
pub mod engine;

pub use moving_averages::*;
pub use oscillators::*;
pub use trend::*;
pub use volatility::*;
pub use engine::*;

use std::fmt::Debug;

/// 종가 시퀀스 전체를 입력으로 받는 순수 지표.
///
/// 입력은 오래된 값부터 시간순으로 정렬되어 있어야 한다.
pub trait Indicator: Debug + Send + Sync {
  type Output;

  fn name(&self) -> &str;

  // 값을 하나라도 만들기 위해 필요한 최소 데이터 수
  fn required_points(&self) -> usize;

  // 전체 시퀀스에 대한 지표 계산
  fn calculate(&self, closes: &[f64]) -> Result<Self::Output, crate::error::SignalError>;
}

//! 암호화폐 신호 분석 라이브러리
//!
//! 심볼별 종가 스트림을 받아 지표(EMA, RSI, MACD, 볼린저)를 계산하고
//! BUY/SELL/WAIT 신호와 사유를 만들어, 신호가 바뀔 때 알림을 보냅니다.

pub mod config;
pub mod core;
pub mod error;
pub mod http;
pub mod indicators;
pub mod market_data;
pub mod models;
pub mod notification;
pub mod signals;
pub mod utils;

// 핵심 타입 재노출
pub use crate::core::SignalService;
pub use crate::error::SignalError;
pub use crate::indicators::{IndicatorEngine, IndicatorSnapshot};
pub use crate::market_data::TimeSeriesStore;
pub use crate::models::{IngestOutcome, PriceObservation};
pub use crate::notification::{Notification, NotificationDispatcher, Notifier};
pub use crate::signals::{ChangeGate, Signal, SignalClassifier, SignalRecord};

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, SignalError>;

/**
* filename : signal_service
* author : HAMA
* date: 2025. 5. 12.
* description: 관측치 수신 -> 저장 -> 분류 -> 변경 감지
**/

use std::sync::Arc;

use chrono::Utc;

use crate::error::SignalError;
use crate::indicators::MIN_ENGINE_POINTS;
use crate::market_data::series_store::TimeSeriesStore;
use crate::models::{EarlyWaitRecord, IngestOutcome, PriceObservation, StatusReport};
use crate::notification::NotificationDispatcher;
use crate::signals::{ChangeGate, SignalClassifier};

pub struct SignalService {
  store: Arc<TimeSeriesStore>,
  classifier: SignalClassifier,
  gate: ChangeGate,
  min_candles: usize,
}

impl SignalService {
  /// `min_candles` 는 지표 계산 최소치(3) 아래로 내려가지 않는다.
  pub fn new(store: Arc<TimeSeriesStore>, dispatcher: NotificationDispatcher, min_candles: usize) -> Self {
    if min_candles < MIN_ENGINE_POINTS {
      log::warn!("min_candles {} raised to {}", min_candles, MIN_ENGINE_POINTS);
    }
    SignalService {
      gate: ChangeGate::new(store.clone(), dispatcher),
      store,
      classifier: SignalClassifier::default(),
      min_candles: min_candles.max(MIN_ENGINE_POINTS),
    }
  }

  pub fn min_candles(&self) -> usize {
    self.min_candles
  }

  pub fn store(&self) -> &Arc<TimeSeriesStore> {
    &self.store
  }

  /// 종가 하나를 처리한다.
  ///
  /// 저장된 캔들이 `min_candles` 미만이면 분류/변경 감지/알림 없이 WAIT 을 돌려준다.
  pub fn ingest(&self, observation: &PriceObservation) -> Result<IngestOutcome, SignalError> {
    if !observation.close.is_finite() {
      return Err(SignalError::InvalidParameter(format!("close must be finite: {}", observation.close)));
    }

    // 락은 append 안에서만 잡힌다
    let closes = self.store.append(&observation.symbol, observation.close)?;
    log::debug!("{} close {} ({} candles)", observation.symbol, observation.close, closes.len());

    if closes.len() < self.min_candles {
      return Ok(IngestOutcome::NotEnoughCandles(EarlyWaitRecord::not_enough_candles(closes.len())));
    }

    let record = self.classifier.classify(&closes);
    self.gate.observe(&observation.symbol, &record)?;

    Ok(IngestOutcome::Classified(record))
  }

  pub fn status(&self) -> Result<StatusReport, SignalError> {
    Ok(StatusReport {
      status: "ok".to_string(),
      symbols_count: self.store.symbol_count()?,
      time: Utc::now().timestamp(),
    })
  }
}

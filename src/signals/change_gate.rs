/**
* filename : change_gate
* author : HAMA
* date: 2025. 5. 12.
* description: 신호 변경 감지 후 알림 전달
**/

use std::sync::Arc;

use crate::error::SignalError;
use crate::market_data::series_store::TimeSeriesStore;
use crate::notification::{Notification, NotificationDispatcher};
use super::signal_types::SignalRecord;

pub struct ChangeGate {
  store: Arc<TimeSeriesStore>,
  dispatcher: NotificationDispatcher,
}

impl ChangeGate {
  pub fn new(store: Arc<TimeSeriesStore>, dispatcher: NotificationDispatcher) -> Self {
    ChangeGate { store, dispatcher }
  }

  /// 직전 신호와 다르면 저장하고 알림을 넘긴다. 알림 결과는 기다리지 않는다.
  ///
  /// 최초 관측은 저장된 신호가 없으므로 WAIT 이라도 항상 변경으로 본다.
  pub fn observe(&self, symbol: &str, record: &SignalRecord) -> Result<bool, SignalError> {
    let changed = self.store.compare_and_set_signal(symbol, record.signal)?;
    if !changed {
      return Ok(false);
    }

    log::info!("signal changed: {} -> {} ({})", symbol, record.signal, record.reasons.join(", "));

    let price = match record.price() {
      Some(p) => p,
      None => {
        log::warn!("signal record for {} has no details; notification skipped", symbol);
        return Ok(true);
      }
    };

    let notification = Notification::new(
      TimeSeriesStore::normalize(symbol),
      price,
      record.signal,
      record.reasons.clone(),
    );
    if let Err(e) = self.dispatcher.dispatch(notification) {
      log::error!("failed to hand off notification for {}: {}", symbol, e);
    }

    Ok(true)
  }
}

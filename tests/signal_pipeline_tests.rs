//! 신호 파이프라인 통합 테스트
//!
//! 저장소 -> 지표 -> 분류 -> 변경 감지 -> 알림 전체 흐름

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockall::mock;
use xSignal::models::{EarlyWaitRecord, IngestOutcome};
use xSignal::notification::{Notification, NotificationDispatcher, Notifier};
use xSignal::{ChangeGate, IndicatorSnapshot, PriceObservation, Signal, SignalClassifier, SignalError, SignalService, TimeSeriesStore};

mock! {
  pub Sink {}

  #[async_trait]
  impl Notifier for Sink {
    fn name(&self) -> &'static str;
    async fn notify(&self, notification: &Notification) -> Result<(), SignalError>;
  }
}

fn mock_sink(expected: usize, counter: Arc<AtomicUsize>) -> MockSink {
  let mut sink = MockSink::new();
  sink.expect_name().return_const("mock");
  sink.expect_notify()
    .times(expected)
    .returning(move |_| {
      counter.fetch_add(1, Ordering::SeqCst);
      Ok(())
    });
  sink
}

#[tokio::test]
async fn test_constant_series_scenario() {
  let counter = Arc::new(AtomicUsize::new(0));
  let sink = Arc::new(mock_sink(1, counter.clone()));
  let (dispatcher, worker) = NotificationDispatcher::spawn(sink.clone(), Duration::from_secs(1));
  let service = SignalService::new(Arc::new(TimeSeriesStore::new(500)), dispatcher, 5);

  let mut last = None;
  for _ in 0..5 {
    last = Some(service.ingest(&PriceObservation::new("BTC", 100.0)).unwrap());
  }

  let record = match last.unwrap() {
    IngestOutcome::Classified(record) => record,
    other => panic!("unexpected outcome: {:?}", other),
  };
  assert_eq!(record.signal, Signal::Buy);
  assert_eq!(record.reasons, vec!["RSI < 30 (oversold)"]);
  assert_eq!(
    record.details,
    Some(IndicatorSnapshot {
      rsi: Some(0.0),
      macd: Some(0.0),
      macd_signal: Some(0.0),
      boll_lower: Some(100.0),
      boll_upper: Some(100.0),
      ema20: Some(100.0),
      price: 100.0,
    })
  );

  drop(service);
  worker.join().await;
  assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_identical_signals_dispatch_once() {
  let counter = Arc::new(AtomicUsize::new(0));
  let sink = Arc::new(mock_sink(1, counter.clone()));
  let (dispatcher, worker) = NotificationDispatcher::spawn(sink.clone(), Duration::from_secs(1));
  let service = SignalService::new(Arc::new(TimeSeriesStore::new(500)), dispatcher, 5);

  // 5번째부터 매번 같은 BUY
  for _ in 0..12 {
    service.ingest(&PriceObservation::new("eth", 2500.0)).unwrap();
  }

  drop(service);
  worker.join().await;
  assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_signal_transition_dispatches_again() {
  let counter = Arc::new(AtomicUsize::new(0));
  let sink = Arc::new(mock_sink(2, counter.clone()));
  let (dispatcher, worker) = NotificationDispatcher::spawn(sink.clone(), Duration::from_secs(1));
  let store = Arc::new(TimeSeriesStore::new(500));
  let gate = ChangeGate::new(store.clone(), dispatcher);
  let classifier = SignalClassifier::default();

  let bullish = classifier.classify_snapshot(IndicatorSnapshot {
    rsi: Some(25.0),
    macd: None,
    macd_signal: None,
    boll_lower: None,
    boll_upper: None,
    ema20: None,
    price: 100.0,
  });
  let bearish = classifier.classify_snapshot(IndicatorSnapshot {
    rsi: Some(75.0),
    macd: Some(-1.0),
    macd_signal: Some(0.5),
    boll_lower: Some(90.0),
    boll_upper: Some(99.0),
    ema20: Some(101.0),
    price: 100.0,
  });
  assert_eq!(bullish.signal, Signal::Buy);
  assert_eq!(bearish.signal, Signal::Wait);

  assert!(gate.observe("sol", &bullish).unwrap());
  assert!(gate.observe("SOL", &bearish).unwrap());
  assert!(!gate.observe("SOL", &bearish).unwrap());
  assert_eq!(store.last_signal("SOL").unwrap(), Some(Signal::Wait));

  drop(gate);
  worker.join().await;
  assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_early_wait_never_dispatches() {
  let counter = Arc::new(AtomicUsize::new(0));
  let sink = Arc::new(mock_sink(0, counter.clone()));
  let (dispatcher, worker) = NotificationDispatcher::spawn(sink.clone(), Duration::from_secs(1));
  let store = Arc::new(TimeSeriesStore::new(500));
  let service = SignalService::new(store.clone(), dispatcher, 5);

  for (i, close) in [10.0, 11.0, 9.5, 12.0].iter().enumerate() {
    let outcome = service.ingest(&PriceObservation::new("XRP", *close)).unwrap();
    assert_eq!(outcome, IngestOutcome::NotEnoughCandles(EarlyWaitRecord::not_enough_candles(i + 1)));
  }
  assert_eq!(store.last_signal("XRP").unwrap(), None);

  drop(service);
  worker.join().await;
  assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[test]
fn test_bounded_history() {
  let store = TimeSeriesStore::new(500);
  for i in 1..=501 {
    store.append("btc", i as f64).unwrap();
  }
  let series = store.series("BTC").unwrap().unwrap();
  assert_eq!(series.len(), 500);
  assert_eq!(series.first(), Some(&2.0));
  assert_eq!(series.last(), Some(&501.0));
}

#[test]
fn test_classification_is_deterministic() {
  let closes: Vec<f64> = (0..200)
    .map(|i| 100.0 + (i as f64 * 0.37).sin() * 5.0 + i as f64 * 0.05)
    .collect();

  let run = || {
    let store = TimeSeriesStore::new(500);
    let mut snapshot = Vec::new();
    for c in &closes {
      snapshot = store.append("ADA", *c).unwrap();
    }
    SignalClassifier::default().classify(&snapshot)
  };

  assert_eq!(run(), run());
}

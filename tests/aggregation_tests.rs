//! 집계 비대칭성 고정 테스트
//!
//! 현재 사유 문구로는 점수가 음수가 될 수 없어 SELL 이 나오지 않는다.
//! 이 동작이 바뀌면 이 테스트가 먼저 깨져야 한다.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use xSignal::signals::{aggregate_score, evaluate_rules};
use xSignal::{IndicatorSnapshot, Signal, SignalClassifier};

fn random_walk(rng: &mut StdRng, len: usize) -> Vec<f64> {
  let mut price = rng.gen_range(1.0..50_000.0);
  let volatility = rng.gen_range(0.001..0.08);
  (0..len)
    .map(|_| {
      price *= 1.0 + rng.gen_range(-volatility..volatility);
      price
    })
    .collect()
}

fn maybe(rng: &mut StdRng, lo: f64, hi: f64) -> Option<f64> {
  if rng.gen_bool(0.8) { Some(rng.gen_range(lo..hi)) } else { None }
}

#[test]
fn test_sell_is_unreachable_for_random_series() {
  let mut rng = StdRng::seed_from_u64(0x5eed);
  let classifier = SignalClassifier::default();

  for _ in 0..500 {
    let len = rng.gen_range(3..=300);
    let closes = random_walk(&mut rng, len);
    let record = classifier.classify(&closes);

    assert_ne!(record.signal, Signal::Sell, "closes: {:?}", closes);
    assert!(aggregate_score(&record.reasons) >= 0);
  }
}

#[test]
fn test_sell_is_unreachable_for_random_snapshots() {
  let mut rng = StdRng::seed_from_u64(42);
  let classifier = SignalClassifier::default();

  for _ in 0..2_000 {
    let price = rng.gen_range(50.0..150.0);
    let lower = rng.gen_range(40.0..120.0);
    let snapshot = IndicatorSnapshot {
      rsi: maybe(&mut rng, 0.0, 100.0),
      macd: maybe(&mut rng, -5.0, 5.0),
      macd_signal: maybe(&mut rng, -5.0, 5.0),
      boll_lower: Some(lower),
      boll_upper: maybe(&mut rng, lower, lower + 60.0),
      ema20: maybe(&mut rng, 50.0, 150.0),
      price,
    };

    let reasons = evaluate_rules(&snapshot);
    let score = aggregate_score(&reasons);
    assert!(score >= 0, "reasons {:?} scored {}", reasons, score);
    assert_eq!(score as usize, reasons.iter().filter(|r| is_bullish_wording(r)).count());

    let record = classifier.classify_snapshot(snapshot);
    assert_ne!(record.signal, Signal::Sell);
  }
}

fn is_bullish_wording(reason: &str) -> bool {
  matches!(
    reason,
    "RSI < 30 (oversold)" | "MACD > Signal (bullish)" | "price < Bollinger Lower" | "price > EMA(20)"
  )
}

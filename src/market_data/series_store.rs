use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use crate::error::SignalError;
use crate::signals::signal_types::Signal;

/// 심볼별 상태: 최근 종가 + 마지막으로 알린 신호
#[derive(Debug, Default)]
struct SymbolState {
    closes: VecDeque<f64>,
    last_signal: Option<Signal>,
}

/// 메모리 기반 심볼별 종가 저장소
///
/// 모든 심볼이 하나의 락을 공유한다. 락 안에서는 추가/정리/복사만 하고
/// 지표 계산은 반환된 복사본으로 락 밖에서 수행한다.
#[derive(Debug)]
pub struct TimeSeriesStore {
    capacity: usize,
    symbols: Mutex<HashMap<String, SymbolState>>,
}

impl TimeSeriesStore {
    pub fn new(capacity: usize) -> Self {
        TimeSeriesStore {
            capacity: capacity.max(1),
            symbols: Mutex::new(HashMap::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 심볼 키 정규화 (대문자)
    pub fn normalize(symbol: &str) -> String {
        symbol.to_uppercase()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, SymbolState>>, SignalError> {
        self.symbols.lock().map_err(|_| SignalError::LockError)
    }

    /// 종가 추가 후 용량을 넘는 오래된 값을 버리고, 정리된 시퀀스의 복사본을 반환
    pub fn append(&self, symbol: &str, close: f64) -> Result<Vec<f64>, SignalError> {
        let key = Self::normalize(symbol);
        let mut symbols = self.lock()?;

        let state = symbols.entry(key).or_default();
        state.closes.push_back(close);
        while state.closes.len() > self.capacity {
            state.closes.pop_front();
        }

        Ok(state.closes.iter().copied().collect())
    }

    /// 현재 보관 중인 시퀀스 복사본
    pub fn series(&self, symbol: &str) -> Result<Option<Vec<f64>>, SignalError> {
        let symbols = self.lock()?;
        Ok(symbols
            .get(&Self::normalize(symbol))
            .map(|s| s.closes.iter().copied().collect()))
    }

    pub fn last_signal(&self, symbol: &str) -> Result<Option<Signal>, SignalError> {
        let symbols = self.lock()?;
        Ok(symbols
            .get(&Self::normalize(symbol))
            .and_then(|s| s.last_signal))
    }

    pub fn set_last_signal(&self, symbol: &str, signal: Signal) -> Result<(), SignalError> {
        let mut symbols = self.lock()?;
        symbols.entry(Self::normalize(symbol)).or_default().last_signal = Some(signal);
        Ok(())
    }

    /// 저장된 신호와 다를 때만 갱신하고 `true` 를 반환. 비교와 갱신은 한 번의 락 안에서 일어난다.
    pub fn compare_and_set_signal(&self, symbol: &str, signal: Signal) -> Result<bool, SignalError> {
        let mut symbols = self.lock()?;
        let state = symbols.entry(Self::normalize(symbol)).or_default();
        if state.last_signal == Some(signal) {
            return Ok(false);
        }
        state.last_signal = Some(signal);
        Ok(true)
    }

    pub fn symbol_count(&self) -> Result<usize, SignalError> {
        Ok(self.lock()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_append_normalizes_symbol() {
        let store = TimeSeriesStore::new(500);
        store.append("btcusdt", 1.0).unwrap();
        store.append("BtcUsdt", 2.0).unwrap();

        assert_eq!(store.symbol_count().unwrap(), 1);
        assert_eq!(store.series("BTCUSDT").unwrap(), Some(vec![1.0, 2.0]));
    }

    #[test]
    fn test_capacity_is_at_least_one() {
        assert_eq!(TimeSeriesStore::new(0).capacity(), 1);

        let store = TimeSeriesStore::new(2);
        assert_eq!(store.capacity(), 2);
        store.append("ETH", 1.0).unwrap();
        store.append("ETH", 2.0).unwrap();
        assert_eq!(store.append("ETH", 3.0).unwrap(), vec![2.0, 3.0]);
    }

    #[test]
    fn test_append_trims_oldest_first() {
        let store = TimeSeriesStore::new(500);
        let mut last = Vec::new();
        for i in 1..=501 {
            last = store.append("BTC", i as f64).unwrap();
            assert!(last.len() <= 500);
        }

        let expected: Vec<f64> = (2..=501).map(|i| i as f64).collect();
        assert_eq!(last, expected);
        assert_eq!(store.series("BTC").unwrap(), Some(expected));
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        let store = TimeSeriesStore::new(3);
        let mut snapshot = store.append("ETH", 1.0).unwrap();
        snapshot.push(99.0);

        assert_eq!(store.series("ETH").unwrap(), Some(vec![1.0]));
    }

    #[test]
    fn test_last_signal_roundtrip() {
        let store = TimeSeriesStore::new(10);
        assert_eq!(store.last_signal("SOL").unwrap(), None);

        store.set_last_signal("sol", Signal::Buy).unwrap();
        assert_eq!(store.last_signal("SOL").unwrap(), Some(Signal::Buy));
    }

    #[test]
    fn test_compare_and_set_signal() {
        let store = TimeSeriesStore::new(10);
        assert!(store.compare_and_set_signal("SOL", Signal::Wait).unwrap());
        assert!(!store.compare_and_set_signal("SOL", Signal::Wait).unwrap());
        assert!(store.compare_and_set_signal("SOL", Signal::Buy).unwrap());
        assert_eq!(store.last_signal("SOL").unwrap(), Some(Signal::Buy));
    }

    #[test]
    fn test_concurrent_appends_are_serialized() {
        let store = Arc::new(TimeSeriesStore::new(10_000));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..250 {
                        let symbol = if t % 2 == 0 { "AAA" } else { "BBB" };
                        store.append(symbol, i as f64).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.series("AAA").unwrap().unwrap().len(), 1000);
        assert_eq!(store.series("BBB").unwrap().unwrap().len(), 1000);
    }
}

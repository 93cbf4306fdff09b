use serde::{Deserialize, Serialize};

use crate::signals::signal_types::{Signal, SignalRecord, REASON_NOT_ENOUGH_CANDLES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleCount {
    pub count: usize,
}

/// 캔들이 부족해 분류하지 않은 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarlyWaitRecord {
    pub signal: Signal,
    pub reasons: Vec<String>,
    pub details: CandleCount,
}

impl EarlyWaitRecord {
    pub fn not_enough_candles(count: usize) -> Self {
        EarlyWaitRecord {
            signal: Signal::Wait,
            reasons: vec![REASON_NOT_ENOUGH_CANDLES.to_string()],
            details: CandleCount { count },
        }
    }
}

/// 수신 처리 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IngestOutcome {
    NotEnoughCandles(EarlyWaitRecord),
    Classified(SignalRecord),
}

impl IngestOutcome {
    pub fn signal(&self) -> Signal {
        match self {
            IngestOutcome::NotEnoughCandles(r) => r.signal,
            IngestOutcome::Classified(r) => r.signal,
        }
    }

    pub fn reasons(&self) -> &[String] {
        match self {
            IngestOutcome::NotEnoughCandles(r) => &r.reasons,
            IngestOutcome::Classified(r) => &r.reasons,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: String,
    pub symbols_count: usize,
    pub time: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_early_wait_shape() {
        let outcome = IngestOutcome::NotEnoughCandles(EarlyWaitRecord::not_enough_candles(3));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"signal": "WAIT", "reasons": ["not enough candles"], "details": {"count": 3}})
        );
    }
}

use std::sync::Arc;

use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::Value;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::core::SignalService;
use crate::error::SignalError;
use crate::models::PriceObservation;
use crate::utils::logging::log_error;

/// 바이낸스 kline 이벤트 중 필요한 필드
#[derive(Debug, Clone, Deserialize)]
struct KlinePayload {
    #[serde(rename = "s")]
    symbol: String,
    #[serde(rename = "c")]
    close: String,
    #[serde(rename = "T")]
    close_time: i64,
    #[serde(rename = "x")]
    is_closed: bool,
}

/// 마감된 캔들
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedCandle {
    pub symbol: String,
    pub close: f64,
    pub close_time: i64,
    pub raw: Value,
}

impl ClosedCandle {
    pub fn into_observation(self) -> PriceObservation {
        PriceObservation::new(self.symbol, self.close)
            .with_timestamp(self.close_time)
            .with_raw(self.raw)
    }
}

/// kline 스트림 URL (`<base>/<symbol>@kline_<interval>`)
pub fn stream_url(base_url: &str, symbol: &str, interval: &str) -> String {
    format!("{}/{}@kline_{}", base_url.trim_end_matches('/'), symbol.to_lowercase(), interval)
}

/// 웹소켓 텍스트 메시지 파싱. kline 이 아니거나 아직 마감되지 않은 캔들이면 `None`.
pub fn parse_kline_message(text: &str) -> Result<Option<ClosedCandle>, SignalError> {
    let json: Value = serde_json::from_str(text)?;
    let raw = match json.get("k") {
        Some(k) => k.clone(),
        None => return Ok(None),
    };

    let payload: KlinePayload = serde_json::from_value(raw.clone())?;
    if !payload.is_closed {
        return Ok(None);
    }

    let close = payload.close.parse::<f64>()
        .map_err(|e| SignalError::ParseError(format!("invalid close '{}': {}", payload.close, e)))?;

    Ok(Some(ClosedCandle {
        symbol: payload.symbol.to_uppercase(),
        close,
        close_time: payload.close_time,
        raw,
    }))
}

/// 서버 측 바이낸스 kline 수신기
pub struct BinanceKlineFeed {
    base_url: String,
    interval: String,
    reconnect_interval: Duration,
    service: Arc<SignalService>,
}

impl BinanceKlineFeed {
    pub fn new(base_url: impl Into<String>, interval: impl Into<String>, service: Arc<SignalService>) -> Self {
        BinanceKlineFeed {
            base_url: base_url.into(),
            interval: interval.into(),
            reconnect_interval: Duration::from_secs(5),
            service,
        }
    }

    /// 심볼 하나에 대한 수신 태스크 시작
    pub fn spawn(&self, symbol: &str) -> JoinHandle<()> {
        let url = stream_url(&self.base_url, symbol, &self.interval);
        let service = self.service.clone();
        let reconnect_interval = self.reconnect_interval;

        tokio::spawn(async move {
            loop {
                match connect_async(url.as_str()).await {
                    Ok((mut ws_stream, _)) => {
                        log::info!("kline stream connected: {}", url);

                        while let Some(msg_result) = ws_stream.next().await {
                            match msg_result {
                                Ok(Message::Text(text)) => handle_text(&service, &text),
                                Ok(Message::Close(frame)) => {
                                    log::warn!("kline stream closed by server: {:?}", frame);
                                    break;
                                }
                                Ok(_) => {}
                                Err(e) => {
                                    log::error!("WebSocket error: {}", e);
                                    break;
                                }
                            }
                        }
                    }
                    Err(e) => {
                        log::error!("Failed to connect to {}: {}", url, e);
                    }
                }

                // 재연결 대기
                tokio::time::sleep(reconnect_interval).await;
                log::info!("Attempting to reconnect kline stream {}...", url);
            }
        })
    }
}

fn handle_text(service: &SignalService, text: &str) {
    match parse_kline_message(text) {
        Ok(Some(candle)) => {
            let symbol = candle.symbol.clone();
            match service.ingest(&candle.into_observation()) {
                Ok(outcome) => log::debug!("{} -> {}", symbol, outcome.signal()),
                Err(e) => log_error(&format!("kline ingest {}", symbol), &e),
            }
        }
        Ok(None) => {}
        Err(e) => log::warn!("unparseable kline message: {}", e),
    }
}

/**
* filename : main
* author : HAMA
* date: 2025. 5. 12.
* description:
**/

use std::sync::Arc;
use std::time::Duration;

use xSignal::config::Config;
use xSignal::http::{build_router, AppState};
use xSignal::market_data::{BinanceKlineFeed, TimeSeriesStore};
use xSignal::notification::{LogNotifier, NotificationDispatcher, Notifier, TelegramNotifier};
use xSignal::utils::logging;
use xSignal::SignalService;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // 설정 로드
    let config = Config::load()?;

    // 로깅 초기화
    logging::init(&config.logging.level)?;
    log::info!("신호 분석 서버 시작... (v{})", xSignal::VERSION);

    // 명령줄 인수: `stream BTCUSDT ETHUSDT` 로 서버 측 kline 수신 활성화
    let args: Vec<String> = std::env::args().collect();
    let mut config = config;
    if args.len() > 1 && args[1] == "stream" {
        let symbols: Vec<String> = args[2..].iter().map(|s| s.to_uppercase()).collect();
        if !symbols.is_empty() {
            config.feed.symbols = symbols;
        }
        config.feed.enabled = true;
    }

    run(config).await
}

async fn run(config: Config) -> Result<(), anyhow::Error> {
    // 알림기 선택
    let notifier: Arc<dyn Notifier> = match TelegramNotifier::from_config(&config.notifier) {
        Some(telegram) => {
            log::info!("텔레그램 알림기 사용 (활성: {})", telegram.is_enabled());
            Arc::new(telegram)
        }
        None => {
            log::info!("텔레그램 설정 없음, 로그 알림기 사용");
            Arc::new(LogNotifier::new())
        }
    };
    let (dispatcher, worker) = NotificationDispatcher::spawn(
        notifier,
        Duration::from_millis(config.notifier.timeout_ms),
    );

    let store = Arc::new(TimeSeriesStore::new(config.engine.history_capacity));
    log::info!("심볼별 보관 캔들 수: {}", store.capacity());
    let service = Arc::new(SignalService::new(store, dispatcher, config.engine.min_candles));

    // kline 수신 태스크
    let mut feed_tasks = Vec::new();
    if config.feed.enabled {
        let feed = BinanceKlineFeed::new(&config.feed.base_url, &config.feed.interval, service.clone());
        for symbol in &config.feed.symbols {
            log::info!("kline 수신 시작: {} ({})", symbol, config.feed.interval);
            feed_tasks.push(feed.spawn(symbol));
        }
    }

    let app = build_router(AppState { service: service.clone() });
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("서버 시작: http://{}/", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    for task in feed_tasks {
        task.abort();
        let _ = task.await;
    }
    // 모든 제출 핸들이 사라져야 워커가 남은 알림을 처리하고 끝난다
    drop(service);
    worker.join().await;

    served?;
    log::info!("서버 종료");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {}", e);
    }
}

//! 로깅 유틸리티
//!
//! 로그 초기화 및 유틸리티 함수 제공

use env_logger::Builder;
use log::LevelFilter;
use std::env;

use crate::error::SignalError;

/// 로그 레벨 문자열 파싱 (알 수 없는 값은 info)
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// 로깅 시스템 초기화. RUST_LOG 가 있으면 설정값보다 우선한다.
pub fn init(default_level: &str) -> Result<(), SignalError> {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());
    let level_filter = parse_level(&log_level);

    Builder::new()
        .filter_level(level_filter)
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| SignalError::ConfigError(format!("logger already initialized: {}", e)))?;

    log::info!("로깅 시스템 초기화 완료: 레벨 = {}", level_filter);

    Ok(())
}

/// 오류 로그
pub fn log_error(context: &str, error: &SignalError) {
    log::error!("오류 발생 - {}: {}", context, error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("warn"), LevelFilter::Warn);
        assert_eq!(parse_level("verbose"), LevelFilter::Info);
    }
}

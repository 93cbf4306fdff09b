//! 신호 처리 흐름의 핵심 구현체

pub mod signal_service;

pub use signal_service::SignalService;

/**
* filename : config
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::SignalError;
use crate::indicators::MIN_ENGINE_POINTS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub engine: EngineConfig,
    pub notifier: NotifierConfig,
    pub logging: LoggingConfig,
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 심볼당 보관할 최대 캔들 수
    pub history_capacity: usize,
    /// 분류를 시작하기 위한 최소 캔들 수
    pub min_candles: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    pub telegram_enabled: bool,
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub api_base: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub enabled: bool,
    pub base_url: String,
    pub interval: String,
    pub symbols: Vec<String>,
}

impl Config {
    /// Load configuration from `config.json`, falling back to defaults
    pub fn load() -> Result<Self, SignalError> {
        Self::load_from(Path::new("config.json"))
    }

    pub fn load_from(config_path: &Path) -> Result<Self, SignalError> {
        let mut cfg = if config_path.exists() {
            let mut file = File::open(config_path)
                .map_err(|e| SignalError::ConfigError(format!("Failed to open config file: {}", e)))?;

            let mut contents = String::new();
            file.read_to_string(&mut contents)
                .map_err(|e| SignalError::ConfigError(format!("Failed to read config file: {}", e)))?;

            serde_json::from_str::<Config>(&contents)
                .map_err(|e| SignalError::ConfigError(format!("Failed to parse config file: {}", e)))?
        } else {
            Config::default()
        };

        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply environment variable overrides for secrets and runtime fields
    fn apply_env_overrides(&mut self) -> Result<(), SignalError> {
        use std::env;
        if let Ok(v) = env::var("SERVER_HOST") { if !v.is_empty() { self.server.host = v; } }
        if let Ok(v) = env::var("SERVER_PORT") {
            self.server.port = v.parse()
                .map_err(|_| SignalError::ConfigError(format!("SERVER_PORT is not a port: {}", v)))?;
        }
        if let Ok(v) = env::var("TELEGRAM_BOT_TOKEN") { if !v.is_empty() { self.notifier.bot_token = Some(v); } }
        if let Ok(v) = env::var("TELEGRAM_CHAT_ID") { if !v.is_empty() { self.notifier.chat_id = Some(v); } }
        if let Ok(v) = env::var("SEND_TELEGRAM") {
            let lower = v.to_lowercase();
            if ["1","true","yes"].contains(&lower.as_str()) { self.notifier.telegram_enabled = true; }
            if ["0","false","no"].contains(&lower.as_str()) { self.notifier.telegram_enabled = false; }
        }
        if let Ok(v) = env::var("NOTIFY_TIMEOUT_MS") {
            self.notifier.timeout_ms = v.parse()
                .map_err(|_| SignalError::ConfigError(format!("NOTIFY_TIMEOUT_MS is not a number: {}", v)))?;
        }
        if let Ok(v) = env::var("HISTORY_CAPACITY") {
            self.engine.history_capacity = v.parse()
                .map_err(|_| SignalError::ConfigError(format!("HISTORY_CAPACITY is not a number: {}", v)))?;
        }
        if let Ok(v) = env::var("FEED_SYMBOLS") {
            self.feed.symbols = parse_symbol_list(&v);
            self.feed.enabled = !self.feed.symbols.is_empty();
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), SignalError> {
        if self.engine.history_capacity == 0 {
            return Err(SignalError::ConfigError("history_capacity must be positive".to_string()));
        }
        if self.engine.min_candles < MIN_ENGINE_POINTS {
            return Err(SignalError::ConfigError(format!(
                "min_candles ({}) must be at least {}",
                self.engine.min_candles, MIN_ENGINE_POINTS
            )));
        }
        if self.engine.min_candles > self.engine.history_capacity {
            return Err(SignalError::ConfigError(format!(
                "min_candles ({}) exceeds history_capacity ({})",
                self.engine.min_candles, self.engine.history_capacity
            )));
        }
        if self.notifier.telegram_enabled
            && (self.notifier.bot_token.is_none() || self.notifier.chat_id.is_none())
        {
            return Err(SignalError::ConfigError(
                "telegram enabled without bot token and chat id".to_string(),
            ));
        }
        Ok(())
    }
}

/// "btcusdt, ethusdt" -> ["BTCUSDT", "ETHUSDT"]
pub fn parse_symbol_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            engine: EngineConfig {
                history_capacity: 500,
                min_candles: 5,
            },
            notifier: NotifierConfig {
                telegram_enabled: false,
                bot_token: None,
                chat_id: None,
                api_base: "https://api.telegram.org".to_string(),
                timeout_ms: 10_000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            feed: FeedConfig {
                enabled: false,
                base_url: "wss://stream.binance.com:9443/ws".to_string(),
                interval: "1m".to_string(),
                symbols: Vec::new(),
            },
        }
    }
}

/**
* filename : mod
* author : HAMA
* date: 2025. 5. 12.
* description: 신호 변경 알림
**/

pub mod traits;
pub mod dispatcher;
pub mod telegram;
pub mod log_notifier;

pub use traits::Notifier;
pub use dispatcher::{DispatchWorker, NotificationDispatcher};
pub use telegram::TelegramNotifier;
pub use log_notifier::LogNotifier;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::signals::signal_types::Signal;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub symbol: String,
    pub price: f64,
    pub signal: Signal,
    pub reasons: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(symbol: impl Into<String>, price: f64, signal: Signal, reasons: Vec<String>) -> Self {
        Notification {
            symbol: symbol.into(),
            price,
            signal,
            reasons,
            created_at: Utc::now(),
        }
    }

    /// 메시지 본문
    pub fn message_text(&self) -> String {
        format!(
            "{} | {}\nprice: {}\nreasons: {}\ntime: {}Z",
            self.symbol,
            self.signal,
            self.price,
            self.reasons.join(", "),
            self.created_at.naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f"),
        )
    }
}

use async_trait::async_trait;

use crate::error::SignalError;
use super::{Notification, Notifier};

/// 외부 전송 없이 로그로만 남기는 알림기
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        LogNotifier
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn notify(&self, notification: &Notification) -> Result<(), SignalError> {
        log::info!("알림: {}", notification.message_text().replace('\n', " / "));
        Ok(())
    }
}

/**
* filename : telegram
* author : HAMA
* date: 2025. 5. 12.
* description: 텔레그램 봇 API 알림기
**/

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::NotifierConfig;
use crate::error::SignalError;
use super::{Notification, Notifier};

#[derive(Debug, Serialize)]
struct SendMessageForm<'a> {
    chat_id: &'a str,
    text: &'a str,
}

pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
    enabled: bool,
}

impl TelegramNotifier {
    pub fn new(
        api_base: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
        enabled: bool,
    ) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            enabled,
        }
    }

    /// 설정에서 생성. 토큰/채팅 ID 가 없으면 `None`
    pub fn from_config(config: &NotifierConfig) -> Option<Self> {
        match (&config.bot_token, &config.chat_id) {
            (Some(token), Some(chat_id)) => Some(Self::new(
                config.api_base.clone(),
                token.clone(),
                chat_id.clone(),
                config.telegram_enabled,
            )),
            _ => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base.trim_end_matches('/'), self.bot_token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn notify(&self, notification: &Notification) -> Result<(), SignalError> {
        if !self.enabled {
            log::debug!("Telegram disabled; skipping send for {}", notification.symbol);
            return Ok(());
        }

        let text = notification.message_text();
        let form = SendMessageForm {
            chat_id: &self.chat_id,
            text: &text,
        };

        let response = self.client
            .post(self.send_message_url())
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SignalError::NotificationError(format!(
                "Telegram sendMessage failed: {}",
                response.status()
            )));
        }

        log::debug!("Telegram message sent for {} ({})", notification.symbol, notification.signal);
        Ok(())
    }
}

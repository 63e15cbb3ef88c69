// src/services/notifier.rs

//! Chat notification delivery.
//!
//! [`Messenger`] is the raw transport. [`Notifier`] wraps it so that
//! delivery failures are logged and never reach the caller.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Credentials, TelegramConfig};

/// Sends a text message to a fixed recipient.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<()>;
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API transport bound to one chat.
pub struct TelegramMessenger {
    client: Client,
    url: String,
    chat_id: String,
}

impl TelegramMessenger {
    pub fn new(client: Client, config: &TelegramConfig, credentials: &Credentials) -> Self {
        let url = format!(
            "{}/bot{}/sendMessage",
            config.api_base.trim_end_matches('/'),
            credentials.telegram_token
        );
        Self {
            client,
            url,
            chat_id: credentials.telegram_chat_id.clone(),
        }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_message(&self, text: &str) -> Result<()> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };
        // Errors are stripped of the URL since it carries the bot token.
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::delivery(e.without_url()))?;

        let status = response.status();
        let reply: Option<SendMessageResponse> = response.json().await.ok();

        match reply {
            Some(reply) if reply.ok && status.is_success() => Ok(()),
            Some(SendMessageResponse {
                description: Some(description),
                ..
            }) => Err(AppError::delivery(format!(
                "status code {}: {}",
                status.as_u16(),
                description
            ))),
            _ => Err(AppError::delivery(format!("status code {}", status.as_u16()))),
        }
    }
}

/// Delivers messages and swallows delivery failures.
pub struct Notifier<M> {
    messenger: M,
}

impl<M: Messenger> Notifier<M> {
    pub fn new(messenger: M) -> Self {
        Self { messenger }
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Send `message`. Failures are logged at error level and discarded.
    pub async fn notify(&self, message: &str) {
        log::info!("Sending message.");
        match self.messenger.send_message(message).await {
            Ok(()) => log::debug!("Bot sent message \"{}\".", message),
            Err(e) => log::error!("Failed to send message: {}.", e),
        }
    }
}

// src/pipeline/poll.rs

//! Status polling loop.
//!
//! Each cycle fetches statuses since the cursor, validates the payload,
//! reports the newest homework and advances the cursor. Failures are logged
//! every time but only notified when their text differs from the last one.

use std::future::Future;
use std::time::Duration;

use crate::error::Result;
use crate::services::{Messenger, Notifier, StatusSource};
use crate::utils::error_chain;

use super::validate::{check_response, current_date, parse_status};

/// Sequential poller owning the cursor and error dedup state.
pub struct Poller<S, M> {
    source: S,
    notifier: Notifier<M>,
    cursor: i64,
    last_error: Option<String>,
    retry_period: Duration,
}

impl<S: StatusSource, M: Messenger> Poller<S, M> {
    pub fn new(source: S, notifier: Notifier<M>, cursor: i64, retry_period: Duration) -> Self {
        Self {
            source,
            notifier,
            cursor,
            last_error: None,
            retry_period,
        }
    }

    /// Start of the next query window (Unix seconds).
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Text of the most recently notified failure.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn notifier(&self) -> &Notifier<M> {
        &self.notifier
    }

    /// Send the greeting, then poll until `shutdown` resolves.
    ///
    /// `shutdown` is polled once before anything else so that signal
    /// listeners are registered up front. After that it is observed between
    /// iterations only; an in-flight cycle always completes.
    pub async fn run(&mut self, greeting: &str, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);

        let stopped_early = tokio::select! {
            biased;
            _ = &mut shutdown => true,
            _ = std::future::ready(()) => false,
        };
        if stopped_early {
            log::info!("Stopped by user.");
            return;
        }

        self.notifier.notify(greeting).await;

        loop {
            self.run_cycle().await;

            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.retry_period) => {}
            }
        }

        log::info!("Stopped by user.");
    }

    /// Run a single iteration without pacing.
    pub async fn run_cycle(&mut self) {
        match self.check_statuses().await {
            Ok(next_cursor) => self.cursor = next_cursor,
            Err(error) => {
                let message = format!("Failure: {error}.");
                log::error!("{} ({})", message, error_chain(&error));
                if self.last_error.as_deref() != Some(message.as_str()) {
                    self.notifier.notify(&message).await;
                    self.last_error = Some(message);
                }
            }
        }
    }

    /// Fetch, validate and report. Returns the next cursor value.
    async fn check_statuses(&self) -> Result<i64> {
        let response = self.source.fetch(self.cursor).await?;
        let homeworks = check_response(&response)?;
        let next_cursor = current_date(&response)?;

        if let Some(latest) = homeworks.first() {
            let message = parse_status(latest)?;
            self.notifier.notify(&message).await;
        }

        Ok(next_cursor)
    }
}

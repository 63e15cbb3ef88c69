// src/services/status.rs

//! Homework status fetcher.
//!
//! Queries the review API for statuses changed since a Unix timestamp and
//! returns the decoded JSON body. Structural checks happen in
//! [`crate::pipeline::validate`].

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, Credentials};
use crate::utils::http::{create_api_client, describe_failure};

/// Source of raw status payloads.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch statuses changed since `from_date` (Unix seconds).
    async fn fetch(&self, from_date: i64) -> Result<Value>;
}

/// Client for the homework status endpoint.
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    /// Create a client with its own timeout-bounded HTTP client.
    pub fn new(config: &ApiConfig, credentials: &Credentials) -> Result<Self> {
        Ok(Self::with_client(
            create_api_client(config)?,
            &config.endpoint,
            &credentials.practicum_token,
        ))
    }

    /// Create a client around an existing HTTP client.
    pub fn with_client(client: Client, endpoint: &str, token: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        log::info!(
            "Requesting {} with params from_date={}",
            self.endpoint,
            from_date
        );

        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                log::error!("Request to {} failed: {}", self.endpoint, e);
                AppError::transport(
                    &self.endpoint,
                    format!(
                        "request with from_date={} {}",
                        from_date,
                        describe_failure(&e)
                    ),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            log::error!(
                "Endpoint {} is unavailable, status code: {}",
                self.endpoint,
                status.as_u16()
            );
            return Err(AppError::transport(
                &self.endpoint,
                format!("status code {}", status.as_u16()),
            ));
        }

        let body = response.bytes().await.map_err(|e| {
            log::error!("Reading body from {} failed: {}", self.endpoint, e);
            AppError::transport(&self.endpoint, "response body could not be read")
        })?;

        log::info!(
            "Request to {} with params from_date={} succeeded",
            self.endpoint,
            from_date
        );

        serde_json::from_slice(&body).map_err(|e| {
            log::error!("Response from {} is not valid JSON: {}", self.endpoint, e);
            AppError::decode(&self.endpoint, e)
        })
    }
}

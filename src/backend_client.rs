//! REST implementation of the catalog and save collaborators.
//!
//! Catalog reads are retried on connection failures, timeouts and 5xx
//! responses with exponential backoff plus random jitter. A variant save is
//! only retried when the connection could not be established, since the backend
//! may already have stored a request that timed out.

use anyhow::{bail, Context, Result};
use rand::Rng;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::backend_config::{BackendConfig, RecoveryConfig};
use crate::catalog::{CatalogSource, SaveResponse, VariantSaver};
use crate::variant_model::RecipeVariantFormData;

pub const INVENTORY_PATH: &str = "inventory";
pub const RECIPES_PATH: &str = "recipes";
pub const VARIANTS_PATH: &str = "recipe-variants";

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    config: BackendConfig,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    async fn get_list(&self, path: &str) -> Result<Vec<Value>> {
        let url = self.config.endpoint(path);
        let response = self
            .send_with_retry(path, true, || self.http.get(&url))
            .await?
            .error_for_status()
            .with_context(|| format!("Backend refused {url}"))?;
        let body: Value = response
            .json()
            .await
            .with_context(|| format!("Invalid JSON from {url}"))?;
        let items = extract_list(body).with_context(|| format!("Unexpected body from {url}"))?;
        debug!(path, count = items.len(), "Fetched catalog");
        Ok(items)
    }

    async fn send_with_retry<F>(&self, what: &str, idempotent: bool, build: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let recovery = &self.config.recovery;
        let mut attempt = 0;
        loop {
            match build().send().await {
                Ok(response)
                    if idempotent
                        && response.status().is_server_error()
                        && attempt < recovery.max_retries =>
                {
                    warn!(status = %response.status(), attempt, "Transient response for {}", what);
                }
                Ok(response) => return Ok(response),
                Err(e) if should_retry(&e, idempotent) && attempt < recovery.max_retries => {
                    warn!(error = %e, attempt, "Request for {} failed, retrying", what);
                }
                Err(e) => return Err(e).with_context(|| format!("Request for {what} failed")),
            }
            attempt += 1;
            let delay = calculate_retry_delay(attempt, recovery);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }
}

impl CatalogSource for BackendClient {
    async fn inventory_items(&self) -> Result<Vec<Value>> {
        self.get_list(INVENTORY_PATH).await
    }

    async fn recipes(&self) -> Result<Vec<Value>> {
        self.get_list(RECIPES_PATH).await
    }
}

impl VariantSaver for BackendClient {
    async fn save(&self, data: &RecipeVariantFormData) -> Result<SaveResponse> {
        let url = self.config.endpoint(VARIANTS_PATH);
        let response = self
            .send_with_retry(VARIANTS_PATH, false, || self.http.post(&url).json(data))
            .await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response from {url}"))?;
        Ok(parse_save_response(status, &body))
    }
}

fn should_retry(err: &reqwest::Error, idempotent: bool) -> bool {
    err.is_connect() || (idempotent && err.is_timeout())
}

/// Delay before retry number `attempt` (1-based), in milliseconds.
///
/// Doubles from `base_retry_delay_ms`, capped at `max_retry_delay_ms`, then adds
/// up to a quarter of that as jitter.
pub fn calculate_retry_delay(attempt: u32, recovery: &RecoveryConfig) -> u64 {
    let exponent = attempt.saturating_sub(1).min(16);
    let delay = recovery
        .base_retry_delay_ms
        .saturating_mul(1u64 << exponent)
        .min(recovery.max_retry_delay_ms);
    let jitter = rand::thread_rng().gen_range(0..=delay / 4);
    delay + jitter
}

/// Catalog bodies are either a bare array or wrapped as `{"data": [...]}`
pub fn extract_list(body: Value) -> Result<Vec<Value>> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut obj) => match obj.remove("data") {
            Some(Value::Array(items)) => Ok(items),
            _ => bail!("expected an array or an object with a data array"),
        },
        _ => bail!("expected an array or an object with a data array"),
    }
}

/// Interpret the save endpoint's reply.
///
/// A `{success, error}` body is taken as-is, except that a non-2xx status is
/// never reported as success. Other bodies fall back to the HTTP status, with
/// a `message` or `error` field used as the error text when present.
pub fn parse_save_response(status: StatusCode, body: &str) -> SaveResponse {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    if let Some(response) = parsed
        .as_ref()
        .and_then(|value| serde_json::from_value::<SaveResponse>(value.clone()).ok())
    {
        if status.is_success() || !response.success {
            return response;
        }
    }

    if status.is_success() {
        return SaveResponse::ok();
    }

    let message = parsed
        .as_ref()
        .and_then(|value| value.get("message").or_else(|| value.get("error")))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status));
    SaveResponse::failed(&message)
}

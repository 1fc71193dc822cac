//! OpenAI client construction.

use crate::config::{Credentials, SummarySettings};
use crate::error::{Result, TldwError};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create an OpenAI client for the configured endpoint with a request timeout.
///
/// The client's own rate-limit backoff is disabled: a 429 comes back on the
/// first attempt and retries are left to the summarizer.
pub fn create_client(credentials: &Credentials, settings: &SummarySettings) -> Result<Client<OpenAIConfig>> {
    let mut config = OpenAIConfig::new().with_api_key(credentials.api_key());
    if let Some(base) = settings.api_base.as_deref() {
        config = config.with_api_base(base.trim_end_matches('/'));
    }

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_seconds))
        .build()
        .map_err(|e| TldwError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let no_retry = backoff::ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build();

    Ok(Client::with_config(config)
        .with_http_client(http_client)
        .with_backoff(no_retry))
}

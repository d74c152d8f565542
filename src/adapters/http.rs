use crate::config::toml_config::ApiConfig;
use crate::domain::model::{
    AnalysisSegment, PlayerGroupSegmentCriteria, RequestedAnalysisRequest, TypeEntry,
};
use crate::domain::ports::MotionApi;
use crate::utils::error::{RebootError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

pub const API_KEY_HEADER: &str = "x-api-key";
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Exponential backoff for transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
}

impl RetryPolicy {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_delay.saturating_mul(factor).min(MAX_RETRY_DELAY)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
        }
    }
}

/// HTTP client for the Reboot Motion API.
pub struct RebootClient {
    client: Client,
    base_url: Url,
    api_key: String,
    retry: RetryPolicy,
}

impl RebootClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        Self::with_settings(base_url, api_key, Duration::from_secs(30), RetryPolicy::default())
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| RebootError::MissingConfigError {
                field: "api.api_key".to_string(),
            })?;
        Self::with_settings(
            &config.base_url,
            api_key,
            Duration::from_secs(config.timeout_seconds),
            RetryPolicy {
                max_retries: config.retry_attempts,
                initial_delay: Duration::from_millis(config.retry_delay_ms),
            },
        )
    }

    pub fn with_settings(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("reboot-analysis/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            api_key: api_key.into(),
            retry,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| RebootError::InvalidConfigValueError {
                field: "api.base_url".to_string(),
                value: self.base_url.to_string(),
                reason: format!("cannot join '{}': {}", path, e),
            })
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let mut attempt = 0;
        loop {
            match self.send_once(method.clone(), &url, path, body).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for(attempt);
                    attempt += 1;
                    tracing::warn!(
                        "⚠️ {} {} failed ({}), retry {}/{} in {:?}",
                        method,
                        path,
                        e,
                        attempt,
                        self.retry.max_retries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_once<B, T>(&self, method: Method, url: &Url, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        tracing::debug!("Making API request: {} {}", method, url);
        let mut request = self
            .client
            .request(method, url.clone())
            .header(API_KEY_HEADER, &self.api_key);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let text = response.text().await?;
        if !status.is_success() {
            return Err(RebootError::ApiStatusError {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| RebootError::UnexpectedResponseError {
            endpoint: path.to_string(),
            message: format!("{} (body: {})", e, text),
        })
    }
}

// A base URL without a trailing slash would lose its last path segment on join.
fn parse_base_url(base_url: &str) -> Result<Url> {
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };
    Url::parse(&normalized).map_err(|e| RebootError::InvalidConfigValueError {
        field: "api.base_url".to_string(),
        value: base_url.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })
}

#[async_trait]
impl MotionApi for RebootClient {
    async fn create_player_group_segment(
        &self,
        criteria: &PlayerGroupSegmentCriteria,
    ) -> Result<AnalysisSegment> {
        self.send(Method::POST, "player_group_segments", Some(criteria))
            .await
    }

    async fn create_requested_analysis(
        &self,
        request: &RequestedAnalysisRequest,
    ) -> Result<serde_json::Value> {
        self.send(Method::POST, "requested_analyses", Some(request))
            .await
    }

    async fn list_movement_types(&self) -> Result<Vec<TypeEntry>> {
        self.send::<(), _>(Method::GET, "movement_types", None).await
    }

    async fn list_mocap_types(&self) -> Result<Vec<TypeEntry>> {
        self.send::<(), _>(Method::GET, "mocap_types", None).await
    }
}

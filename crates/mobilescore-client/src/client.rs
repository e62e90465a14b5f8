use crate::response::PageSpeedResponse;
use crate::retry::{RetryError, RetryPolicy};
use crate::transport::{HttpTransport, Transport};
use crate::{Error, Result};
use mobilescore_core::record::MetricRecord;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// Device profile Lighthouse emulates for the audit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Mobile,
    Desktop,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Mobile => "mobile",
            Strategy::Desktop => "desktop",
        }
    }
}

/// PageSpeed Insights client producing one [`MetricRecord`] per URL.
pub struct PageSpeedClient<T = HttpTransport> {
    transport: T,
    endpoint: Url,
    api_key: String,
    strategy: Strategy,
    retry: RetryPolicy,
}

impl PageSpeedClient<HttpTransport> {
    /// Client over HTTPS with the given per-request timeout
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(timeout)?, api_key))
    }
}

impl<T: Transport> PageSpeedClient<T> {
    pub fn with_transport(transport: T, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            api_key: api_key.into(),
            strategy: Strategy::default(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn request_url(&self, url: &str) -> Url {
        let mut request = self.endpoint.clone();
        request
            .query_pairs_mut()
            .append_pair("url", url)
            .append_pair("strategy", self.strategy.as_str())
            .append_pair("key", &self.api_key);
        request
    }

    /// Audit `url`, retrying HTTP and connection failures per the retry policy.
    ///
    /// Fails with [`Error::FetchExhausted`] once every attempt has failed, or
    /// with [`Error::MalformedResponse`] (without retrying) when a 200 body
    /// lacks an expected field.
    pub async fn fetch(&self, url: &str) -> Result<MetricRecord> {
        tracing::debug!(
            "Fetching {} metrics for {}",
            self.strategy.as_str(),
            url
        );

        let outcome = self
            .retry
            .run(move |attempt| self.attempt(url, attempt), Error::is_transient)
            .await;

        match outcome {
            Ok(record) => {
                tracing::info!(
                    "Fetched metrics for {}: score {} ({})",
                    url,
                    record.performance_score,
                    record.category().as_str()
                );
                Ok(record)
            }
            Err(RetryError::Permanent(err)) => Err(err),
            Err(RetryError::Exhausted { attempts, last }) => Err(match last {
                Error::Status { status, body } => Error::FetchExhausted {
                    url: url.to_string(),
                    attempts,
                    status: Some(status),
                    body,
                },
                Error::Transport(message) => Error::FetchExhausted {
                    url: url.to_string(),
                    attempts,
                    status: None,
                    body: message,
                },
                other => other,
            }),
        }
    }

    async fn attempt(&self, url: &str, attempt: u32) -> Result<MetricRecord> {
        tracing::debug!("Requesting audit for {} (attempt {})", url, attempt);

        let response = self.transport.get(&self.request_url(url)).await?;
        if response.status != 200 {
            return Err(Error::Status {
                status: response.status,
                body: response.body,
            });
        }

        PageSpeedResponse::parse(url, &response.body)?.into_record(url)
    }
}

use std::{fmt::Debug, sync::Arc, time::Duration};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use nonzero_ext::nonzero;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::Config;

use super::{
    metrics::RequestMetrics,
    types::{RiotApiError, RiotApiResponse},
};

/// Retry schedule applied to HTTP 429 responses. Delays double from `initial`
/// up to `cap`; once the capped delay has been slept, the 429 is surfaced.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub initial: Duration,
    pub cap: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial: Duration::from_secs(5),
            cap: Duration::from_secs(60),
        }
    }
}

#[derive(Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    /// Riot API Key
    key: String,
    retry: RetryPolicy,
    pub metrics: Arc<RequestMetrics>,
}

impl ApiClient {
    /// Create a new API client using the provided key and the default quota
    /// (100 requests per minute, burst of 20).
    pub fn new(api_key: String) -> Self {
        let q = Quota::per_minute(nonzero!(100_u32)).allow_burst(nonzero!(20_u32));

        Self::with_settings(
            api_key,
            q,
            Duration::from_secs(10),
            RetryPolicy::default(),
        )
    }

    pub fn from_config(config: &Config) -> Self {
        let q = Quota::per_minute(config.requests_per_minute).allow_burst(config.request_burst);

        Self::with_settings(
            config.riot_api_key.clone(),
            q,
            config.request_timeout,
            RetryPolicy {
                initial: config.retry_initial_backoff,
                cap: config.retry_max_backoff,
            },
        )
    }

    pub fn with_settings(
        key: String,
        quota: Quota,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("HTTP client construction"),
            limiter: RateLimiter::direct(quota),
            key,
            retry,
            metrics: RequestMetrics::new("riot"),
        }
    }

    /// Spawn a task logging periodic metrics about requests.
    pub fn start_metrics_logging(&self) {
        let metrics = self.metrics.clone();
        tokio::spawn(async move { metrics.log_loop().await });
    }

    pub async fn request<T: DeserializeOwned + Debug>(&self, path: String) -> RiotApiResponse<T> {
        let mut delay = self.retry.initial;
        let mut exhausted = false;

        loop {
            // Ensure we do not enforce the Riot API rate limits before doing any request
            self.limiter.until_ready().await;
            self.metrics.inc();

            let res = self
                .client
                .get(&path)
                .header("X-Riot-Token", &self.key)
                .send()
                .await
                .map_err(RiotApiError::Reqwest)?;

            match res.status() {
                StatusCode::OK => {
                    let raw = res.bytes().await.map_err(RiotApiError::Reqwest)?;
                    return serde_json::from_slice(&raw).map_err(RiotApiError::Serde);
                }
                StatusCode::TOO_MANY_REQUESTS if !exhausted => {
                    let wait = delay.min(self.retry.cap);
                    exhausted = delay >= self.retry.cap;
                    tracing::warn!(
                        "429 from the Riot API, backing off for {}ms",
                        wait.as_millis()
                    );
                    tokio::time::sleep(wait).await;
                    delay *= 2;
                }
                status => return Err(RiotApiError::Status(status)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn request_propagates_reqwest_error() {
        let client = ApiClient::new("RGAPI-INVALID-KEY".to_string());

        let bad_url = "ht!tp://invalid-url".to_string(); // incorrect schema

        let res: RiotApiResponse<()> = client.request(bad_url).await;

        assert!(matches!(res, Err(RiotApiError::Reqwest(_))));
    }
}

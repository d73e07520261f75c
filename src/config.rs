use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

use crate::error::PipelineError;

#[derive(Debug, Clone)]
pub struct Config {
    pub riot_api_key: String,
    /// Quota of the shared rate limiter.
    pub requests_per_minute: NonZeroU32,
    pub request_burst: NonZeroU32,
    /// Concurrency ceiling for participant and leaderboard fan-outs.
    pub fan_out_limit: usize,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Upper bound on one participant's name/league sub-fetch during the
    /// lobby fan-out; expiry degrades the participant to unknown/unranked.
    pub participant_timeout: Duration,
    /// First delay of the 429 backoff schedule.
    pub retry_initial_backoff: Duration,
    /// Largest delay of the 429 backoff schedule; the capped delay is slept
    /// once before the error is surfaced.
    pub retry_max_backoff: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, PipelineError> {
        dotenvy::dotenv().ok();

        const DEFAULT_REQUESTS_PER_MINUTE: u32 = 100;
        const DEFAULT_REQUEST_BURST: u32 = 20;
        const DEFAULT_FAN_OUT_LIMIT: usize = 20;
        const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
        const DEFAULT_PARTICIPANT_TIMEOUT_SECS: u64 = 30;
        const DEFAULT_RETRY_INITIAL_BACKOFF_SECS: u64 = 5;
        const DEFAULT_RETRY_MAX_BACKOFF_SECS: u64 = 60;

        let riot_api_key = env::var("RIOT_API_KEY")
            .map_err(|_| PipelineError::Config("RIOT_API_KEY must be set".into()))?;

        let requests_per_minute = env::var("RIOT_REQUESTS_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse().ok())
            .and_then(NonZeroU32::new)
            .unwrap_or_else(|| {
                NonZeroU32::new(DEFAULT_REQUESTS_PER_MINUTE).unwrap_or(NonZeroU32::MIN)
            });

        let request_burst = env::var("RIOT_REQUEST_BURST")
            .ok()
            .and_then(|v| v.parse().ok())
            .and_then(NonZeroU32::new)
            .unwrap_or_else(|| NonZeroU32::new(DEFAULT_REQUEST_BURST).unwrap_or(NonZeroU32::MIN));

        let fan_out_limit = env::var("FAN_OUT_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_FAN_OUT_LIMIT);

        let request_timeout = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

        let participant_timeout = env::var("PARTICIPANT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_PARTICIPANT_TIMEOUT_SECS));

        let retry_initial_backoff = env::var("RETRY_INITIAL_BACKOFF_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_RETRY_INITIAL_BACKOFF_SECS));

        let retry_max_backoff = env::var("RETRY_MAX_BACKOFF_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_RETRY_MAX_BACKOFF_SECS));

        Ok(Self {
            riot_api_key,
            requests_per_minute,
            request_burst,
            fan_out_limit,
            request_timeout,
            participant_timeout,
            retry_initial_backoff,
            retry_max_backoff,
        })
    }
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Self {
            riot_api_key: "RGAPI-TEST-KEY".into(),
            requests_per_minute: NonZeroU32::new(100).unwrap(),
            request_burst: NonZeroU32::new(20).unwrap(),
            fan_out_limit: 20,
            request_timeout: Duration::from_secs(10),
            participant_timeout: Duration::from_secs(30),
            retry_initial_backoff: Duration::from_secs(5),
            retry_max_backoff: Duration::from_secs(60),
        }
    }
}

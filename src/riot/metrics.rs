use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tracing::{Instrument, info_span};

/// Counts outbound Riot API requests so operators can watch how close the
/// pipeline runs to its quota.
#[derive(Debug)]
pub struct RequestMetrics {
    started_at: Instant,
    requests: AtomicU64,
    name: &'static str,
}

impl RequestMetrics {
    pub fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            started_at: Instant::now(),
            requests: AtomicU64::new(0),
            name,
        })
    }

    pub fn inc(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Average request rate since construction, in requests per minute.
    pub fn per_minute(&self) -> f64 {
        let elapsed_min = self.started_at.elapsed().as_secs_f64() / 60.0;
        if elapsed_min > 0.0 {
            self.total() as f64 / elapsed_min
        } else {
            0.0
        }
    }

    /// Log the running totals once a minute until the task is dropped.
    pub async fn log_loop(self: Arc<Self>) {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            let span = info_span!("📊 ", client = self.name);
            async {
                interval.tick().await;
                tracing::info!(
                    "{} requests executed (avg {:.2} req/min)",
                    self.total(),
                    self.per_minute()
                );
            }
            .instrument(span)
            .await
        }
    }
}

//! Minimum spacing between outbound quote requests
//!
//! One gate is shared by every caller of a `StockService`. The lock is held
//! across the wait, so callers that arrive together leave one interval apart.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

pub struct RequestGate {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RequestGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the interval since the previous call has elapsed, then
    /// record and return the new call time
    pub async fn wait_turn(&self) -> Instant {
        let mut last_call = self.last_call.lock().await;

        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                log::debug!("Rate limiting: sleeping for {:?}", wait);
                sleep(wait).await;
            }
        }

        let now = Instant::now();
        *last_call = Some(now);
        now
    }
}

//! Minimum-interval gate for outbound requests.
//!
//! One shared wall-clock timestamp of the last outbound call, updated
//! atomically. A caller sleeps out whatever remains of the interval, then
//! stamps the clock. Overlapping callers each compute their wait against
//! the latest stamp, which spaces bursts to roughly one call per interval
//! without any mutex. The guarantee is best-effort pacing for politeness
//! toward public APIs, not a hard admission control.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Gate enforcing a minimum wall-clock interval between calls.
pub struct RateLimiter {
    min_interval: Duration,
    /// Millis since the Unix epoch of the last permitted call; 0 = never.
    last_call_ms: AtomicU64,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call_ms: AtomicU64::new(0),
        }
    }

    /// Wait until at least the configured interval has passed since the
    /// previous call, then record this one. May suspend the calling task;
    /// no lock is held across the suspension.
    pub async fn acquire(&self) {
        let min_ms = self.min_interval.as_millis() as u64;
        let last = self.last_call_ms.load(Ordering::SeqCst);
        let elapsed = now_millis().saturating_sub(last);
        if elapsed < min_ms {
            tokio::time::sleep(Duration::from_millis(min_ms - elapsed)).await;
        }
        self.last_call_ms.store(now_millis(), Ordering::SeqCst);
    }
}

/// Wall-clock time in millis since the Unix epoch.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

//! ---
//! mv_section: "05-networking-external-interfaces"
//! mv_subsection: "module"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Megaverse REST client and domain types."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
//! Fixed-interval self-throttling for outbound requests.
//!
//! All requests share one last-completion instant behind an async mutex. A
//! caller holds the [`ThrottlePermit`] for the whole request, so requests are
//! serialised and each one starts at least `interval` after the previous one
//! finished, whether it succeeded or not.

use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time::{sleep_until, Instant};
use tracing::trace;

/// Gate enforcing a minimum spacing between consecutive requests.
#[derive(Debug)]
pub struct RequestThrottle {
    interval: Duration,
    last_completed: Mutex<Option<Instant>>,
}

/// Exclusive right to issue one request. Dropping it records completion.
#[derive(Debug)]
pub struct ThrottlePermit<'a> {
    last_completed: MutexGuard<'a, Option<Instant>>,
}

impl RequestThrottle {
    /// Create a throttle with the given minimum interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_completed: Mutex::new(None),
        }
    }

    /// Minimum spacing between requests.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait for the previous request to finish and for the interval to elapse.
    pub async fn acquire(&self) -> ThrottlePermit<'_> {
        let guard = self.last_completed.lock().await;
        if let Some(last) = *guard {
            let ready_at = last + self.interval;
            let now = Instant::now();
            if ready_at > now {
                trace!(
                    wait_ms = (ready_at - now).as_millis() as u64,
                    "throttling request"
                );
                sleep_until(ready_at).await;
            }
        }
        ThrottlePermit {
            last_completed: guard,
        }
    }
}

impl Drop for ThrottlePermit<'_> {
    fn drop(&mut self) {
        *self.last_completed = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const INTERVAL: Duration = Duration::from_millis(60);

    #[tokio::test]
    async fn first_request_is_not_delayed() {
        let throttle = RequestThrottle::new(Duration::from_secs(5));
        assert_eq!(throttle.interval(), Duration::from_secs(5));
        let started = Instant::now();
        drop(throttle.acquire().await);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn consecutive_requests_are_spaced_from_completion() {
        let throttle = RequestThrottle::new(INTERVAL);
        let permit = throttle.acquire().await;
        // Simulated request latency does not count towards the interval.
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(permit);
        let completed = Instant::now();

        drop(throttle.acquire().await);
        assert!(completed.elapsed() >= INTERVAL);
    }

    #[tokio::test]
    async fn concurrent_callers_never_overlap() {
        let throttle = Arc::new(RequestThrottle::new(INTERVAL));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let throttle = Arc::clone(&throttle);
            handles.push(tokio::spawn(async move {
                let _permit = throttle.acquire().await;
                Instant::now()
            }));
        }
        let mut starts = Vec::new();
        for handle in handles {
            starts.push(handle.await.unwrap());
        }
        starts.sort();
        for pair in starts.windows(2) {
            assert!(pair[1] - pair[0] >= INTERVAL, "requests issued too close together");
        }
    }
}

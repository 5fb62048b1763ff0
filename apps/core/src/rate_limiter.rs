use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed {
        remaining: usize,
    },
    /// `retry_after` is how long until the oldest request leaves the window.
    Limited {
        retry_after: Duration,
    },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }
}

/// A simple rate limiter using a sliding window algorithm.
///
/// It tracks request timestamps for each client key (the caller's IP address)
/// to determine if a new request is allowed.
pub struct RateLimiter {
    /// Timestamps of accepted requests per client, oldest first.
    requests: HashMap<String, VecDeque<Instant>>,
    /// The maximum number of requests allowed within the `window`.
    limit: usize,
    /// The duration of the sliding window.
    window: Duration,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        RateLimiter {
            requests: HashMap::new(),
            limit,
            window,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Records the request if it fits in the window.
    pub fn check(&mut self, id: &str) -> RateDecision {
        self.check_at(id, Instant::now())
    }

    fn check_at(&mut self, id: &str, now: Instant) -> RateDecision {
        let window = self.window;
        let client_requests = self.requests.entry(id.to_string()).or_default();

        // Drop timestamps that have left the window
        while let Some(oldest) = client_requests.front() {
            if now.duration_since(*oldest) >= window {
                client_requests.pop_front();
            } else {
                break;
            }
        }

        if client_requests.len() < self.limit {
            client_requests.push_back(now);
            RateDecision::Allowed {
                remaining: self.limit - client_requests.len(),
            }
        } else {
            let retry_after = client_requests
                .front()
                .map(|oldest| window.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or(window);
            RateDecision::Limited { retry_after }
        }
    }

    /// Forgets clients with no request inside the window.
    pub fn prune(&mut self) {
        let now = Instant::now();
        let window = self.window;
        self.requests.retain(|_, timestamps| {
            timestamps
                .back()
                .is_some_and(|latest| now.duration_since(*latest) < window)
        });
    }

    pub fn tracked_clients(&self) -> usize {
        self.requests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_rate_limiter_allows_requests_within_limit() {
        let mut limiter = RateLimiter::new(5, Duration::from_secs(1));
        for expected_remaining in (0..5).rev() {
            assert_eq!(
                limiter.check("client1"),
                RateDecision::Allowed {
                    remaining: expected_remaining
                }
            );
        }
        assert!(!limiter.check("client1").is_allowed());
    }

    #[test]
    fn test_rate_limiter_resets_after_window() {
        let mut limiter = RateLimiter::new(2, Duration::from_millis(50));
        assert!(limiter.check("client2").is_allowed());
        assert!(limiter.check("client2").is_allowed());
        assert!(!limiter.check("client2").is_allowed());

        thread::sleep(Duration::from_millis(60));

        assert!(limiter.check("client2").is_allowed());
    }

    #[test]
    fn test_rate_limiter_handles_multiple_clients() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(1));
        assert!(limiter.check("client3").is_allowed());
        assert!(!limiter.check("client3").is_allowed());
        assert!(limiter.check("client4").is_allowed());
        assert!(!limiter.check("client4").is_allowed());
    }

    #[test]
    fn test_retry_after_tracks_oldest_request() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();
        assert!(limiter.check_at("ip", start).is_allowed());

        let decision = limiter.check_at("ip", start + Duration::from_secs(20));
        assert_eq!(
            decision,
            RateDecision::Limited {
                retry_after: Duration::from_secs(40)
            }
        );
    }

    #[test]
    fn test_prune_drops_idle_clients() {
        let mut limiter = RateLimiter::new(3, Duration::from_millis(20));
        limiter.check("idle");
        thread::sleep(Duration::from_millis(40));
        limiter.check("active");

        limiter.prune();
        assert_eq!(limiter.tracked_clients(), 1);
    }
}

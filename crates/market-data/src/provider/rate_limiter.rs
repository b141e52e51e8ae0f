//! Token bucket rate limiter for market data providers.
//!
//! Each provider owns one bucket sized from its [`RateLimit`]. The bucket
//! refills continuously at `requests_per_minute / 60` tokens per second and
//! holds at most `burst` tokens. A `min_delay` additionally spaces out
//! consecutive requests.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::limits::RateLimit;

/// Token bucket state.
#[derive(Debug)]
struct TokenBucket {
    /// Current number of available tokens.
    tokens: f64,
    /// Last time the bucket was updated.
    last_update: Instant,
    /// Last time a token was handed out.
    last_acquired: Option<Instant>,
    /// Token refill rate (tokens per second).
    rate: f64,
    /// Maximum bucket capacity.
    capacity: f64,
    /// Minimum spacing between acquisitions.
    min_delay: Duration,
}

impl TokenBucket {
    fn from_limit(limit: &RateLimit) -> Self {
        let capacity = f64::from(limit.burst.max(1));
        Self {
            tokens: capacity,
            last_update: Instant::now(),
            last_acquired: None,
            rate: f64::from(limit.requests_per_minute.max(1)) / 60.0,
            capacity,
            min_delay: limit.min_delay,
        }
    }

    /// Refill tokens based on elapsed time.
    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();

        self.tokens = (self.tokens + elapsed * self.rate).min(self.capacity);
        self.last_update = now;
    }

    /// Time left before `min_delay` has passed since the last acquisition.
    fn spacing_remaining(&self) -> Duration {
        self.last_acquired
            .map(|at| self.min_delay.saturating_sub(at.elapsed()))
            .unwrap_or(Duration::ZERO)
    }

    /// Try to acquire a token immediately.
    fn try_acquire(&mut self) -> bool {
        self.refill();

        if self.tokens >= 1.0 && self.spacing_remaining() == Duration::ZERO {
            self.tokens -= 1.0;
            self.last_acquired = Some(Instant::now());
            true
        } else {
            false
        }
    }

    /// Calculate the wait time until a token becomes available.
    fn time_until_available(&mut self) -> Duration {
        self.refill();

        let for_tokens = if self.tokens >= 1.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64((1.0 - self.tokens) / self.rate)
        };

        for_tokens.max(self.spacing_remaining())
    }
}

/// Token bucket rate limiter for a single provider.
///
/// Thread-safe; the scanner only ever calls it sequentially but the provider
/// is shared behind an `Arc`.
pub struct RateLimiter {
    bucket: Mutex<TokenBucket>,
}

impl RateLimiter {
    /// Create a rate limiter enforcing the given limit.
    pub fn new(limit: RateLimit) -> Self {
        Self {
            bucket: Mutex::new(TokenBucket::from_limit(&limit)),
        }
    }

    /// Lock the bucket, recovering from poison if necessary.
    ///
    /// The worst case after a poisoned lock is slightly incorrect throttling.
    fn lock_bucket(&self) -> MutexGuard<'_, TokenBucket> {
        self.bucket.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limiter bucket mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Acquire a token, waiting asynchronously until one is available.
    pub async fn acquire(&self) {
        loop {
            let wait_time = {
                let mut bucket = self.lock_bucket();
                if bucket.try_acquire() {
                    return;
                }
                bucket.time_until_available()
            };

            if wait_time > Duration::ZERO {
                debug!("Rate limiter: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            } else {
                tokio::task::yield_now().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_spacing(requests_per_minute: u32, burst: u32) -> RateLimit {
        RateLimit {
            requests_per_minute,
            burst,
            min_delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_token_bucket_acquire_up_to_burst() {
        let mut bucket = TokenBucket::from_limit(&no_spacing(60, 3));

        for _ in 0..3 {
            assert!(bucket.try_acquire());
        }

        // Next acquire should fail (no tokens left)
        assert!(!bucket.try_acquire());
    }

    #[test]
    fn test_token_bucket_refill() {
        let mut bucket = TokenBucket::from_limit(&no_spacing(60, 1)); // 1 token/second

        assert!(bucket.try_acquire());
        assert!(!bucket.try_acquire());

        // Simulate elapsed time
        bucket.last_update = Instant::now() - Duration::from_secs(2);

        assert!(bucket.try_acquire());
    }

    #[test]
    fn test_token_bucket_min_delay() {
        let mut bucket = TokenBucket::from_limit(&RateLimit {
            requests_per_minute: 6000,
            burst: 10,
            min_delay: Duration::from_secs(60),
        });

        assert!(bucket.try_acquire());
        // Tokens remain but spacing has not elapsed
        assert!(!bucket.try_acquire());
        assert!(bucket.time_until_available() > Duration::from_secs(50));
    }

    #[test]
    fn test_default_limit_spaces_requests() {
        let mut bucket = TokenBucket::from_limit(&RateLimit::default());
        // Default limit spaces requests by 100ms, so only the first is immediate
        assert!(bucket.try_acquire());
        assert!(!bucket.try_acquire());
        assert!(bucket.time_until_available() > Duration::ZERO);
    }

    #[test]
    fn test_tokens_drain_per_acquire() {
        let mut bucket = TokenBucket::from_limit(&no_spacing(60, 5));
        assert!((bucket.tokens - 5.0).abs() < 0.01);

        bucket.try_acquire();
        bucket.try_acquire();
        bucket.refill();

        assert!((bucket.tokens - 3.0).abs() < 0.01);
    }

    #[test]
    fn test_zero_limits_are_clamped() {
        let mut bucket = TokenBucket::from_limit(&no_spacing(0, 0));
        assert!((bucket.capacity - 1.0).abs() < f64::EPSILON);
        assert!(bucket.try_acquire());
    }

    #[tokio::test]
    async fn test_async_acquire() {
        let limiter = RateLimiter::new(no_spacing(6000, 2)); // 100/second for fast test

        limiter.acquire().await;
        limiter.acquire().await;

        // Third should require waiting (but should complete)
        let start = Instant::now();
        limiter.acquire().await;
        let elapsed = start.elapsed();

        // With 100 req/sec the wait is ~10ms
        assert!(elapsed.as_millis() >= 5);
    }
}

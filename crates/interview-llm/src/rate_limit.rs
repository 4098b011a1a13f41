//! Client-side token-bucket rate limiting (§6.4's `LLM_RATE_LIMIT_PER_MIN`),
//! so a misbehaving session can't starve the shared LLM provider quota.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

struct Bucket {
    tokens: f64,
    capacity: f64,
    refill_per_sec: f64,
    last_refill: Instant,
}

/// A simple token bucket, refilled continuously at `rate_per_min / 60`
/// tokens/sec up to `rate_per_min` capacity.
pub struct RateLimiter {
    bucket: Mutex<Bucket>,
}

impl RateLimiter {
    pub fn new(rate_per_min: u32) -> Self {
        let capacity = rate_per_min.max(1) as f64;
        Self {
            bucket: Mutex::new(Bucket {
                tokens: capacity,
                capacity,
                refill_per_sec: capacity / 60.0,
                last_refill: Instant::now(),
            }),
        }
    }

    fn refill(bucket: &mut Bucket) {
        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * bucket.refill_per_sec).min(bucket.capacity);
        bucket.last_refill = now;
    }

    /// Returns `Some(wait)` with how long the caller should sleep before a
    /// token is available, or `None` if a token was taken immediately.
    pub fn try_acquire(&self) -> Option<Duration> {
        let mut bucket = self.bucket.lock();
        Self::refill(&mut bucket);
        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            None
        } else {
            let deficit = 1.0 - bucket.tokens;
            Some(Duration::from_secs_f64(deficit / bucket.refill_per_sec))
        }
    }

    /// Waits, sleeping cooperatively, until a token is available.
    pub async fn acquire(&self) {
        loop {
            match self.try_acquire() {
                None => return,
                Some(wait) => tokio::time::sleep(wait).await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_bucket_grants_immediately() {
        let limiter = RateLimiter::new(20);
        assert!(limiter.try_acquire().is_none());
    }

    #[test]
    fn exhausted_bucket_reports_wait() {
        let limiter = RateLimiter::new(1);
        assert!(limiter.try_acquire().is_none());
        assert!(limiter.try_acquire().is_some());
    }
}

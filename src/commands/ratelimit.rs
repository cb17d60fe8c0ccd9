//! Token bucket rate limiting per remote address.

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::config;

/// Buckets of addresses are dropped once they would be full again,
/// which is checked at most once per full refill period while
/// attempts come in.
#[derive(Debug)]
pub struct RateLimiter {
    state: RwLock<State>,
    max_tokens: u32,
    refill_interval: Duration,
}

#[derive(Debug, Default)]
struct State {
    buckets: HashMap<IpAddr, TokenBucket>,
    last_sweep: Option<Instant>,
}

#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: u32,
    last_refill: Instant,
}

impl RateLimiter {
    #[must_use]
    pub fn new(max_tokens: u32, refill_interval: Duration) -> Self {
        Self {
            state: RwLock::new(State::default()),
            max_tokens,
            refill_interval,
        }
    }

    #[must_use]
    pub fn from_config(cfg: &config::Ratelimit) -> Self {
        Self::new(cfg.max_attempts.get(), cfg.refill_interval())
    }

    /// Takes one token from the bucket of `ip`. Returns `false` if
    /// the bucket is empty.
    pub async fn attempt(&self, ip: IpAddr) -> bool {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let now = Instant::now();

        match state.last_sweep {
            Some(last) if now.duration_since(last) >= self.full_refill() => {
                self.evict_idle(&mut state.buckets, now);
                state.last_sweep = Some(now);
            }
            Some(..) => {}
            None => state.last_sweep = Some(now),
        }

        let bucket = state.buckets.entry(ip).or_insert(TokenBucket {
            tokens: self.max_tokens,
            last_refill: now,
        });

        let elapsed = now.duration_since(bucket.last_refill);
        if elapsed >= self.refill_interval {
            let intervals = elapsed.as_millis() / self.refill_interval.as_millis().max(1);
            let missing = self.max_tokens - bucket.tokens;
            let refill = u32::try_from(intervals).unwrap_or(u32::MAX).min(missing);

            bucket.tokens += refill;
            bucket.last_refill = now;
        }

        if bucket.tokens > 0 {
            bucket.tokens -= 1;
            true
        } else {
            tracing::debug!(%ip, "rate limited");
            false
        }
    }

    /// Forgets addresses whose buckets would be full again by now,
    /// they behave exactly like a fresh bucket.
    pub async fn cleanup(&self) {
        let mut state = self.state.write().await;
        let now = Instant::now();
        self.evict_idle(&mut state.buckets, now);
        state.last_sweep = Some(now);
    }

    fn evict_idle(&self, buckets: &mut HashMap<IpAddr, TokenBucket>, now: Instant) {
        let interval = self.refill_interval.as_millis().max(1);
        let max_tokens = u128::from(self.max_tokens);

        let before = buckets.len();
        buckets.retain(|_, bucket| {
            let regained = now.duration_since(bucket.last_refill).as_millis() / interval;
            u128::from(bucket.tokens) + regained < max_tokens
        });

        let evicted = before - buckets.len();
        if evicted > 0 {
            tracing::debug!(evicted, "forgot idle rate limit buckets");
        }
    }

    fn full_refill(&self) -> Duration {
        self.refill_interval
            .checked_mul(self.max_tokens)
            .unwrap_or(Duration::MAX)
    }

    #[cfg(test)]
    pub(crate) async fn tracked(&self) -> usize {
        self.state.read().await.buckets.len()
    }
}

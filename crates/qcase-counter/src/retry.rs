//! Bounded retry with exponential backoff

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How conflicting increments are re-executed
///
/// The delay after the `n`-th conflict is `initial_backoff · 2^(n-1)`,
/// capped at `max_backoff`, plus up to half of that again as jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay after the first conflict
    pub initial_backoff: Duration,
    /// Upper bound for a single delay (before jitter)
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Default attempt bound
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 16;

    /// Create a policy
    #[inline]
    #[must_use]
    pub fn new(max_attempts: u32, initial_backoff: Duration, max_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff,
            max_backoff: max_backoff.max(initial_backoff),
        }
    }

    /// Retry immediately, without sleeping
    #[inline]
    #[must_use]
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO, Duration::ZERO)
    }

    /// Whether another attempt is allowed after `attempt` attempts
    #[inline]
    #[must_use]
    pub fn allows_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Deterministic part of the delay after the `attempt`-th conflict
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }

    /// Delay with jitter, so contending writers do not retry in lock-step
    #[must_use]
    pub fn jittered_backoff(&self, attempt: u32) -> Duration {
        let delay = self.backoff(attempt);
        let spread = delay / 2;
        if spread.is_zero() {
            return delay;
        }
        delay + spread.mul_f64(rand::rng().random_range(0.0..=1.0))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_ATTEMPTS,
            Duration::from_millis(5),
            Duration::from_millis(250),
        )
    }
}

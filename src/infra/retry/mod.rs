//! Bounded retry loops shared by the echo resynchronization and the CAN
//! transmitter.
//!
//! A [`RetryPolicy`] caps a loop by attempt count, by elapsed time, or both,
//! and optionally sleeps between attempts. The caller drives the loop and
//! reports each failure with [`Retry::failed`]:
//!
//! ```rust,ignore
//! let mut retry = policy.start(&timer);
//! loop {
//!     if try_once().await {
//!         return Ok(());
//!     }
//!     if !retry.failed(&mut timer).await {
//!         return Err(Exhausted);
//!     }
//! }
//! ```
//!
//! No delay follows the last failed attempt, so `n` attempts sleep at most
//! `n - 1` times.
use crate::protocol::transport::traits::bridge_timer::BridgeTimer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Limits and pacing of a retry loop.
pub struct RetryPolicy {
    /// Maximum number of attempts, `None` for no count limit.
    pub max_attempts: Option<u32>,
    /// Sleep between two attempts (ms). Zero retries immediately.
    pub delay_ms: u32,
    /// Time budget measured from [`RetryPolicy::start`] (ms), `None` for no time limit.
    pub budget_ms: Option<u64>,
}

impl RetryPolicy {
    /// At most `max_attempts` attempts, sleeping `delay_ms` in between.
    pub const fn bounded(max_attempts: u32, delay_ms: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            delay_ms,
            budget_ms: None,
        }
    }

    /// As many immediate attempts as fit in `budget_ms`.
    pub const fn within(budget_ms: u64) -> Self {
        Self {
            max_attempts: None,
            delay_ms: 0,
            budget_ms: Some(budget_ms),
        }
    }

    /// Begin a loop; the time budget starts now.
    pub fn start<T: BridgeTimer>(&self, timer: &T) -> Retry {
        Retry {
            policy: *self,
            attempts: 0,
            started_at_ms: timer.now_ms(),
        }
    }
}

/// State of one running retry loop.
#[derive(Debug)]
pub struct Retry {
    policy: RetryPolicy,
    attempts: u32,
    started_at_ms: u64,
}

impl Retry {
    /// Record a failed attempt. Returns `true`, after the inter-attempt delay,
    /// when another attempt is allowed; `false` once the policy is exhausted.
    pub async fn failed<T: BridgeTimer>(&mut self, timer: &mut T) -> bool {
        self.attempts = self.attempts.saturating_add(1);

        if let Some(max) = self.policy.max_attempts {
            if self.attempts >= max {
                return false;
            }
        }
        if let Some(budget) = self.policy.budget_ms {
            if self.elapsed_ms(timer) >= budget {
                return false;
            }
        }
        if self.policy.delay_ms > 0 {
            timer.delay_ms(self.policy.delay_ms).await;
        }
        true
    }

    /// Failed attempts recorded so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Milliseconds since the loop started.
    pub fn elapsed_ms<T: BridgeTimer>(&self, timer: &T) -> u64 {
        timer.now_ms().saturating_sub(self.started_at_ms)
    }
}

//==================================================================================TESTS
#[cfg(test)]
mod tests {
    use super::*;

    /// Virtual clock: sleeping only advances time.
    struct StepTimer {
        now: u64,
        sleeps: u32,
    }

    impl BridgeTimer for StepTimer {
        fn now_ms(&self) -> u64 {
            self.now
        }

        async fn delay_ms(&mut self, millis: u32) {
            self.now += millis as u64;
            self.sleeps += 1;
        }
    }

    #[tokio::test]
    /// Five attempts, four sleeps, then exhaustion.
    async fn test_bounded_policy_sleeps_between_attempts_only() {
        let mut timer = StepTimer { now: 0, sleeps: 0 };
        let mut retry = RetryPolicy::bounded(5, 1).start(&timer);

        let mut allowed = 0;
        while retry.failed(&mut timer).await {
            allowed += 1;
        }

        assert_eq!(allowed, 4);
        assert_eq!(retry.attempts(), 5);
        assert_eq!(timer.sleeps, 4);
        assert_eq!(timer.now, 4);
    }

    #[tokio::test]
    /// A single-attempt policy never sleeps.
    async fn test_single_attempt_policy() {
        let mut timer = StepTimer { now: 0, sleeps: 0 };
        let mut retry = RetryPolicy::bounded(1, 10).start(&timer);
        assert!(!retry.failed(&mut timer).await);
        assert_eq!(timer.sleeps, 0);
    }

    #[tokio::test]
    /// A time budget stops the loop once the elapsed time reaches it.
    async fn test_time_budget() {
        let mut timer = StepTimer { now: 1_000, sleeps: 0 };
        let mut retry = RetryPolicy::within(100).start(&timer);

        timer.now += 60;
        assert!(retry.failed(&mut timer).await);
        timer.now += 39;
        assert!(retry.failed(&mut timer).await);
        timer.now += 1;
        assert!(!retry.failed(&mut timer).await);
        assert_eq!(retry.elapsed_ms(&timer), 100);
        assert_eq!(timer.sleeps, 0);
    }
}

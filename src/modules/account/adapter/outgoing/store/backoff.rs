use rand::Rng;
use std::time::Duration;

/// Exponential backoff parameters for reaching the store.
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    pub initial_interval: Duration,
    pub multiplier: f64,
    pub max_interval: Duration,
    /// Jitter applied as `[d * (1 - f), d * (1 + f)]`. Zero keeps delays
    /// deterministic and non-decreasing.
    pub randomization_factor: f64,
    /// Total connection attempts, the first one included.
    pub max_attempts: u32,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            multiplier: 1.5,
            max_interval: Duration::from_secs(60),
            randomization_factor: 0.0,
            max_attempts: 20,
        }
    }
}

/// Yields the wait before each retry. The first call returns the initial
/// interval.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    policy: BackoffPolicy,
    current: Duration,
}

impl ExponentialBackoff {
    pub fn new(policy: BackoffPolicy) -> Self {
        let current = policy.initial_interval;
        Self { policy, current }
    }

    pub fn policy(&self) -> &BackoffPolicy {
        &self.policy
    }

    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current.min(self.policy.max_interval);

        self.current = Duration::from_secs_f64(
            (self.current.as_secs_f64() * self.policy.multiplier)
                .min(self.policy.max_interval.as_secs_f64()),
        );

        apply_jitter(delay, self.policy.randomization_factor)
    }
}

fn apply_jitter(delay: Duration, factor: f64) -> Duration {
    if factor <= 0.0 {
        return delay;
    }

    let factor = factor.clamp(0.0, 1.0);
    let base = delay.as_secs_f64();
    let jittered = rand::thread_rng().gen_range(base * (1.0 - factor)..=base * (1.0 + factor));
    Duration::from_secs_f64(jittered)
}

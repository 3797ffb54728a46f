use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Delay between batch trials, so the charts visibly fill up.
///
/// Purely cosmetic: every policy yields the same trial count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PacingPolicy {
    /// Hold `max_delay_ms` for the first `hold_trials` trials, decay linearly
    /// to `min_delay_ms` by trial `decay_until`, then stay there.
    Animated {
        max_delay_ms: u64,
        min_delay_ms: u64,
        hold_trials: u64,
        decay_until: u64,
    },
    /// No delay; the run still yields to the scheduler between trials.
    Immediate,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        PacingPolicy::Animated {
            max_delay_ms: 500,
            min_delay_ms: 10,
            hold_trials: 20,
            decay_until: 100,
        }
    }
}

impl PacingPolicy {
    /// Delay after the trial at 0-based `index`.
    pub fn delay_for(&self, index: u64) -> Duration {
        match *self {
            PacingPolicy::Immediate => Duration::ZERO,
            PacingPolicy::Animated { max_delay_ms, min_delay_ms, hold_trials, decay_until } => {
                let ms = if index < hold_trials {
                    max_delay_ms
                } else if index < decay_until {
                    let span = (decay_until - hold_trials) as f64;
                    let step = max_delay_ms.saturating_sub(min_delay_ms) as f64 / span;
                    let decayed = max_delay_ms as f64 - (index - hold_trials) as f64 * step;
                    (decayed.round() as u64).max(min_delay_ms)
                } else {
                    min_delay_ms
                };
                Duration::from_millis(ms)
            }
        }
    }

    /// Suspend between trials.
    pub async fn pause(&self, index: u64) {
        let delay = self.delay_for(index);
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(delay).await;
        }
    }

    /// Total time a run of `count` trials spends waiting.
    pub fn total_delay(&self, count: u64) -> Duration {
        match *self {
            PacingPolicy::Immediate => Duration::ZERO,
            PacingPolicy::Animated { decay_until, min_delay_ms, .. } => {
                let ramp: Duration = (0..count.min(decay_until)).map(|i| self.delay_for(i)).sum();
                let tail = count.saturating_sub(decay_until);
                ramp + Duration::from_millis(min_delay_ms * tail)
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        match *self {
            PacingPolicy::Immediate => Ok(()),
            PacingPolicy::Animated { max_delay_ms, min_delay_ms, hold_trials, decay_until } => {
                if min_delay_ms > max_delay_ms {
                    return Err(format!(
                        "min_delay_ms ({min_delay_ms}) exceeds max_delay_ms ({max_delay_ms})"
                    ));
                }
                if decay_until <= hold_trials {
                    return Err(format!(
                        "decay_until ({decay_until}) must be greater than hold_trials ({hold_trials})"
                    ));
                }
                Ok(())
            }
        }
    }
}

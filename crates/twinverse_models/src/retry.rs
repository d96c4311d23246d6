//! Bounded exponential-backoff retry loop shared by the Gemini clients.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};
use twinverse_core::FailureKind;

/// Exponential backoff without jitter.
///
/// The wait after attempt `n` (0-indexed) is `initial_backoff * multiplier^n`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use twinverse_models::BackoffPolicy;
///
/// let policy = BackoffPolicy::default();
/// assert_eq!(policy.delay_for(0), Duration::from_secs(1));
/// assert_eq!(policy.delay_for(3), Duration::from_secs(8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Wait after the first failed attempt.
    pub initial_backoff: Duration,
    /// Growth factor between consecutive waits.
    pub multiplier: u32,
}

impl BackoffPolicy {
    /// Creates a policy.
    pub fn new(initial_backoff: Duration, multiplier: u32) -> Self {
        Self {
            initial_backoff,
            multiplier,
        }
    }

    /// Wait before the retry that follows failed attempt `attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(self.multiplier.saturating_pow(attempt))
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial_backoff: Duration::from_secs(1),
            multiplier: 2,
        }
    }
}

/// What a single attempt produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt<T> {
    /// Stop retrying and hand this value back.
    Done(T),
    /// Transient failure; retry if budget remains.
    Retry(FailureKind),
}

/// A run that ended with [`Attempt::Done`].
#[derive(Debug, Clone, PartialEq)]
pub struct Completed<T> {
    /// Value returned by the final attempt.
    pub value: T,
    /// Calls made, including the final one.
    pub attempts: u32,
}

/// A run that used its whole budget on retryable failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exhausted {
    /// Kind reported by the last attempt.
    pub kind: FailureKind,
    /// Calls made; always the full budget.
    pub attempts: u32,
}

/// Runs `operation` until it returns [`Attempt::Done`] or `max_attempts`
/// calls have been made.
///
/// The operation receives the 0-indexed attempt number. No wait follows the
/// final attempt. A budget of 0 is treated as 1.
pub async fn retry_with_backoff<F, Fut, T>(
    policy: &BackoffPolicy,
    max_attempts: u32,
    mut operation: F,
) -> Result<Completed<T>, Exhausted>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Attempt<T>>,
{
    let max_attempts = max_attempts.max(1);
    let mut last_kind = FailureKind::TransportError;

    for attempt in 0..max_attempts {
        debug!(attempt = attempt + 1, max_attempts, "Executing attempt");

        match operation(attempt).await {
            Attempt::Done(value) => {
                if attempt > 0 {
                    debug!(attempts = attempt + 1, "Operation finished after retry");
                }
                return Ok(Completed {
                    value,
                    attempts: attempt + 1,
                });
            }
            Attempt::Retry(kind) => {
                last_kind = kind;
                if attempt + 1 < max_attempts {
                    let delay = policy.delay_for(attempt);
                    debug!(
                        attempt = attempt + 1,
                        kind = %kind,
                        backoff_ms = delay.as_millis() as u64,
                        "Backing off before retry"
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    warn!(attempts = max_attempts, kind = %last_kind, "All retry attempts exhausted");
    Err(Exhausted {
        kind: last_kind,
        attempts: max_attempts,
    })
}

//! Bounded retry for fallible storage operations.
//!
//! Wraps an async operation and re-invokes it when it fails with a transient
//! infrastructure error, with exponential backoff between attempts.
//! Operations passed in must be safe to re-invoke: purely read-only, or
//! writes guarded by a uniqueness constraint so that a duplicate attempt
//! surfaces as a conflict rather than a duplicate row. The policy itself
//! adds no deduplication.

use std::future::Future;
use std::time::Duration;

use crate::{Result, RoombookError};

/// Default number of attempts (1 initial + 2 retries).
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay before the first retry.
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(50);

/// Retry policy for transient storage failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempt budget, including the first invocation.
    max_attempts: u32,
    /// Delay before the first retry; doubles after each failed attempt.
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with an explicit attempt budget and base delay.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Run `op`, retrying failures classified as transient by
    /// [`RoombookError::is_transient`].
    pub async fn run<T, F, Fut>(&self, op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.run_classified(op, RoombookError::is_transient).await
    }

    /// Run `op`, retrying failures for which `classify` returns true.
    ///
    /// Permanent failures are returned immediately. When the attempt budget
    /// is exhausted the last transient error is surfaced.
    pub async fn run_classified<T, F, Fut, C>(&self, mut op: F, classify: C) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
        C: Fn(&RoombookError) -> bool,
    {
        let mut delay = self.base_delay;
        let mut attempt = 1;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_attempts && classify(&e) => {
                    tracing::warn!(attempt, error = %e, "transient failure, retrying");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn transient() -> RoombookError {
        RoombookError::Transient("connection reset".to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_first_attempt() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default();

        let result = policy
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(42)
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_two_transient_failures() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default();

        let result = policy
            .run(|| async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(transient())
                } else {
                    Ok("ok")
                }
            })
            .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_budget_exhaustion_surfaces_last_error() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default();

        let result: Result<()> = policy
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(transient())
            })
            .await;

        assert!(matches!(result, Err(RoombookError::Transient(_))));
        assert_eq!(calls.load(Ordering::SeqCst), DEFAULT_MAX_ATTEMPTS);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_error_not_retried() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default();

        let result: Result<()> = policy
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(RoombookError::Conflict("time slot already reserved".to_string()))
            })
            .await;

        assert!(matches!(result, Err(RoombookError::Conflict(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_classifier() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(4, Duration::from_millis(10));

        // Treat NotFound as retryable for this caller only.
        let result: Result<()> = policy
            .run_classified(
                || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(RoombookError::NotFound("row".to_string()))
                },
                |e| matches!(e, RoombookError::NotFound(_)),
            )
            .await;

        assert!(matches!(result, Err(RoombookError::NotFound(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempt_budget_floor() {
        let calls = AtomicU32::new(0);
        // A zero budget still performs one attempt.
        let policy = RetryPolicy::new(0, Duration::from_millis(10));

        let result: Result<()> = policy
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(transient())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

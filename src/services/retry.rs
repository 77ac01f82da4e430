// src/services/retry.rs
// DOCUMENTATION: Fixed-delay retry for outbound provider calls
// PURPOSE: Re-run a failing async operation a bounded number of times

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Retry policy
/// DOCUMENTATION: Constant delay between attempts, no backoff, no jitter.
/// Every call to `retry` keeps its own attempt counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Pause between consecutive attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Run `operation` until it succeeds or the attempts are used up
    /// DOCUMENTATION: Returns the first success, or the error of the final attempt.
    ///
    /// # Arguments
    /// * `label` - Name of the operation, used in log lines
    /// * `operation` - Closure producing a fresh future per attempt
    pub async fn retry<F, Fut, T, E>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= max_attempts => {
                    log::error!("Error in {} after {} attempts: {}", label, attempt, e);
                    return Err(e);
                }
                Err(e) => {
                    log::warn!(
                        "{} failed (attempt {}/{}), retrying in {:?}: {}",
                        label,
                        attempt,
                        max_attempts,
                        self.delay,
                        e
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

//! Retry loop: run a closure until success or policy says stop.

use crate::error::Result;

use super::classify;
use super::policy::{RetryDecision, RetryPolicy};

/// Runs `f` until it succeeds or the retry policy says to stop.
/// On retryable failure, sleeps for the backoff duration then tries again;
/// the last error is returned unchanged.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, mut f: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(e) => {
                let kind = classify::classify(&e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => return Err(e),
                    RetryDecision::RetryAfter(d) => {
                        tracing::warn!(attempt, ?kind, delay = ?d, error = %e, "retrying request");
                        std::thread::sleep(d);
                        attempt += 1;
                    }
                }
            }
        }
    }
}

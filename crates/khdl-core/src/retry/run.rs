//! Retry loop: run a closure until success or policy says stop.

use super::classify;
use super::policy::{RetryDecision, RetryPolicy};
use crate::transport::TransportError;

/// Runs a closure until it succeeds or the retry policy says to stop.
/// On retryable failure, sleeps for the backoff duration then tries again.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, mut f: F) -> Result<T, TransportError>
where
    F: FnMut() -> Result<T, TransportError>,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(e) => match policy.decide(attempt, classify::classify(&e)) {
                RetryDecision::NoRetry => return Err(e),
                RetryDecision::RetryAfter(d) => {
                    tracing::debug!(attempt, delay_ms = d.as_millis() as u64, "retrying: {}", e);
                    std::thread::sleep(d);
                    attempt += 1;
                }
            },
        }
    }
}

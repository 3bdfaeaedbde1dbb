//! Retry and backoff for page and audio fetches.
//!
//! Transient failures (timeouts, dropped connections, throttling, 5xx) are
//! retried with capped exponential backoff; everything else surfaces at once.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;

//! Transport error type, classified by the retry policy.

use thiserror::Error;

/// Failure of a single fetch.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Curl reported an error (timeout, connection, DNS, etc.).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status after redirects.
    #[error("HTTP {0}")]
    Http(u32),
    /// Server closed the connection before the declared length arrived.
    #[error("partial transfer: expected {expected} bytes, got {received}")]
    PartialTransfer { expected: u64, received: u64 },
}

//! Transport wrapper that retries transient failures.

use super::{Response, ResponseHeaders, Transport, TransportError};
use crate::retry::{run_with_retry, RetryPolicy};

/// Wraps any transport with a [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct RetryingTransport<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T: Transport> RetryingTransport<T> {
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl<T: Transport> Transport for RetryingTransport<T> {
    fn fetch(&self, url: &str) -> Result<Response, TransportError> {
        run_with_retry(&self.policy, || self.inner.fetch(url))
    }

    fn probe(&self, url: &str) -> Result<ResponseHeaders, TransportError> {
        run_with_retry(&self.policy, || self.inner.probe(url))
    }
}

//! Classify HTTP status and curl errors into retry policy error kinds.

use super::policy::ErrorKind;
use crate::transport::TransportError;

/// Classify an HTTP status code for retry decisions.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 | 503 => ErrorKind::Throttled,
        500..=599 => ErrorKind::Http5xx(code as u16),
        _ => ErrorKind::Other,
    }
}

/// Classify a curl error for retry decisions.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

/// Classify a transport error into an ErrorKind.
pub fn classify(e: &TransportError) -> ErrorKind {
    match e {
        TransportError::Curl(ce) => classify_curl_error(ce),
        TransportError::Http(code) => classify_http_status(*code),
        TransportError::PartialTransfer { .. } => ErrorKind::Connection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_429_and_503_throttled() {
        assert_eq!(classify_http_status(429), ErrorKind::Throttled);
        assert_eq!(classify_http_status(503), ErrorKind::Throttled);
    }

    #[test]
    fn http_5xx_retryable() {
        assert!(matches!(classify_http_status(500), ErrorKind::Http5xx(500)));
        assert!(matches!(classify_http_status(502), ErrorKind::Http5xx(502)));
    }

    #[test]
    fn missing_page_is_final() {
        assert_eq!(classify(&TransportError::Http(404)), ErrorKind::Other);
        assert_eq!(classify(&TransportError::Http(403)), ErrorKind::Other);
    }

    #[test]
    fn short_body_is_a_connection_problem() {
        let e = TransportError::PartialTransfer {
            expected: 10,
            received: 3,
        };
        assert_eq!(classify(&e), ErrorKind::Connection);
    }
}

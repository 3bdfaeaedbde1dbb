//! Transport-safe percent-encoding of page and audio addresses.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes left as-is: RFC 3986 unreserved marks plus `:/?&=%`.
///
/// Keeping `%` makes encoding idempotent: an already-escaped `%20` passes
/// through instead of becoming `%2520`.
const TRANSPORT_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b':')
    .remove(b'/')
    .remove(b'?')
    .remove(b'&')
    .remove(b'=')
    .remove(b'%');

/// Percent-encodes `address` so spaces and non-ASCII characters survive the request line.
pub fn encode_for_transport(address: &str) -> String {
    utf8_percent_encode(address, TRANSPORT_SAFE).to_string()
}

//! HTTP GET transport for album pages, track pages and audio bodies.
//!
//! The pipeline only depends on the [`Transport`] trait, so tests can serve
//! canned markup and bytes without touching the network.

mod error;
mod parse;
mod retrying;

pub use error::TransportError;
pub use retrying::RetryingTransport;

use crate::config::KhdlConfig;
use std::str;
use std::time::Duration;

/// Response headers the pipeline cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    /// Declared body size, if `Content-Length` is present and numeric.
    pub content_length: Option<u64>,
    pub content_type: Option<String>,
}

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u32,
    pub headers: ResponseHeaders,
    pub body: Vec<u8>,
}

impl Response {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Fetches a URL, following redirects, and returns the whole body in memory.
pub trait Transport {
    fn fetch(&self, url: &str) -> Result<Response, TransportError>;

    /// Headers only. The default issues a full GET and drops the body.
    fn probe(&self, url: &str) -> Result<ResponseHeaders, TransportError> {
        self.fetch(url).map(|r| r.headers)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch(&self, url: &str) -> Result<Response, TransportError> {
        (**self).fetch(url)
    }

    fn probe(&self, url: &str) -> Result<ResponseHeaders, TransportError> {
        (**self).probe(url)
    }
}

/// Curl options applied to every request.
#[derive(Debug, Clone)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    pub max_redirections: u32,
    pub user_agent: String,
}

impl From<&KhdlConfig> for CurlOptions {
    fn from(cfg: &KhdlConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            low_speed_limit: cfg.low_speed_limit_bytes,
            low_speed_time: Duration::from_secs(cfg.low_speed_time_secs),
            max_redirections: cfg.max_redirections,
            user_agent: cfg.user_agent.clone(),
        }
    }
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self::from(&KhdlConfig::default())
    }
}

/// Blocking libcurl transport: one `Easy` handle per request.
///
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    opts: CurlOptions,
}

impl CurlTransport {
    pub fn new(opts: CurlOptions) -> Self {
        Self { opts }
    }

    fn easy(&self, url: &str) -> Result<curl::easy::Easy, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.opts.max_redirections)?;
        easy.useragent(&self.opts.user_agent)?;
        easy.connect_timeout(self.opts.connect_timeout)?;
        easy.timeout(self.opts.timeout)?;
        easy.low_speed_limit(self.opts.low_speed_limit)?;
        easy.low_speed_time(self.opts.low_speed_time)?;
        Ok(easy)
    }
}

impl Transport for CurlTransport {
    fn fetch(&self, url: &str) -> Result<Response, TransportError> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = self.easy(url)?;
        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        if !(200..300).contains(&status) {
            return Err(TransportError::Http(status));
        }

        let headers = parse::parse_headers(&header_lines);
        if let Some(expected) = headers.content_length {
            let received = body.len() as u64;
            if received < expected {
                return Err(TransportError::PartialTransfer { expected, received });
            }
        }

        tracing::debug!(url, status, bytes = body.len(), "fetched");
        Ok(Response {
            status,
            headers,
            body,
        })
    }

    /// HEAD request; used to size-check an existing file without pulling the body.
    fn probe(&self, url: &str) -> Result<ResponseHeaders, TransportError> {
        let mut header_lines: Vec<String> = Vec::new();

        let mut easy = self.easy(url)?;
        easy.nobody(true)?;
        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        if !(200..300).contains(&status) {
            return Err(TransportError::Http(status));
        }
        Ok(parse::parse_headers(&header_lines))
    }
}

//! Response Model
//!
//! The response shape stored on `put` and reconstructed on `get`. The URL may
//! differ from the request URL after redirects.

use crate::models::Headers;

/// An HTTP response as seen by the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheResponse {
    /// Final response URL, after any redirects
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Raw response body bytes
    pub body: Vec<u8>,
}

impl CacheResponse {
    /// Creates a response with empty headers and body.
    pub fn new(url: impl Into<String>, status: u16) -> Self {
        Self {
            url: url.into(),
            status,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    /// Sets the response headers.
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the response body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

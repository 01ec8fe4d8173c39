//! Request Model
//!
//! The request shape handed in by the fetch framework. Method, URL, and body
//! define the request's identity for key derivation.

use crate::models::Headers;

/// An HTTP request as seen by the cache.
#[derive(Debug, Clone)]
pub struct CacheRequest {
    /// HTTP method, e.g. "GET"
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Raw request body bytes
    pub body: Vec<u8>,
}

impl CacheRequest {
    /// Creates a request with empty headers and body.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    /// Sets the request headers.
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

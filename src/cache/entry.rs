//! Cache Entry Module
//!
//! Defines the metadata record and artifact bundle that make up one stored
//! entry, along with the freshness check used for lazy expiration.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CacheRequest, CacheResponse, Headers};

// == Entry Metadata ==
/// Authoritative machine-readable metadata stored alongside the payload
/// artifacts of an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryMetadata {
    /// Original request URL
    pub url: String,
    /// HTTP method of the original request
    pub method: String,
    /// Response status code
    pub status: u16,
    /// Final response URL after redirects
    pub response_url: Option<String>,
    /// Wall-clock creation time
    pub created_at: DateTime<Utc>,
}

impl EntryMetadata {
    /// URL to rebuild the response with.
    ///
    /// Falls back to the original request URL when no response URL was
    /// recorded; entries written by older cache layouts can omit it.
    pub fn final_url(&self) -> &str {
        self.response_url.as_deref().unwrap_or(&self.url)
    }

    // == Freshness ==
    /// Checks whether the entry has outlived `expiration_secs` at time `now`.
    ///
    /// Zero or negative `expiration_secs` disables expiration entirely. The
    /// comparison is strict: an entry written at `t0` with expiration `T` is
    /// still fresh at exactly `t0 + T` and expired at `t0 + T + 1`.
    pub fn is_expired(&self, now: DateTime<Utc>, expiration_secs: i64) -> bool {
        expiration_secs > 0 && now - self.created_at > Duration::seconds(expiration_secs)
    }
}

// == Cache Entry ==
/// The full unit of storage for one cache key: the metadata record plus four
/// raw payload artifacts.
///
/// On disk an entry is either fully present (all five artifacts) or treated
/// as absent; partial entries are never valid reads.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Entry metadata
    pub metadata: EntryMetadata,
    /// Raw request headers in wire format
    pub request_headers: Vec<u8>,
    /// Raw request body bytes
    pub request_body: Vec<u8>,
    /// Raw response headers in wire format
    pub response_headers: Vec<u8>,
    /// Raw response body bytes
    pub response_body: Vec<u8>,
}

impl CacheEntry {
    // == Assemble ==
    /// Builds the artifact bundle for a completed request/response pair,
    /// stamped with `created_at`.
    pub fn assemble(
        request: &CacheRequest,
        response: &CacheResponse,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            metadata: EntryMetadata {
                url: request.url.clone(),
                method: request.method.clone(),
                status: response.status,
                response_url: Some(response.url.clone()),
                created_at,
            },
            request_headers: request.headers.to_raw(),
            request_body: request.body.clone(),
            response_headers: response.headers.to_raw(),
            response_body: response.body.clone(),
        }
    }

    // == Reconstruct ==
    /// Rebuilds the response object from the stored artifacts.
    pub fn into_response(self) -> CacheResponse {
        let url = self.metadata.final_url().to_string();
        CacheResponse::new(url, self.metadata.status)
            .with_headers(Headers::from_raw(&self.response_headers))
            .with_body(self.response_body)
    }
}

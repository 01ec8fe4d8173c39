//! HTTP Message Models
//!
//! Request and response shapes exchanged with the surrounding fetch
//! framework, plus the raw header wire codec used on disk.

mod headers;
mod requests;
mod responses;

// Re-export public types
pub use headers::Headers;
pub use requests::CacheRequest;
pub use responses::CacheResponse;

//! Request and response models for the API client
//!
//! Wire-level types shared by the dispatcher, the transports and the cache.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{HttpRequest, RequestOptions};
pub use responses::{Download, HttpResponse, Payload};

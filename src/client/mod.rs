//! Client Module
//!
//! The request dispatcher, cache invalidation and the transport seam.
//!
//! # Behaviour
//! - `GET` - served from cache when fresh, coalesced while in flight
//! - anything else - always sent; a 2xx answer clears the whole cache

mod dispatcher;
pub mod invalidation;
pub mod transport;


pub use dispatcher::ApiClient;
pub use invalidation::InvalidationController;
pub use transport::{ReqwestTransport, Transport};

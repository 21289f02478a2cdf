//! ERP Client - REST API access for the back-office screens
//!
//! Every HTTP call goes through [`ApiClient::request`]. Reads (GET) are
//! cached with a short TTL and coalesced while in flight; any successful
//! write clears the whole read cache.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod resources;
pub mod tasks;

pub use client::{ApiClient, Transport};
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use models::{Download, RequestOptions};

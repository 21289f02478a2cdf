//! Typed Resource Calls
//!
//! Thin wrappers over `ApiClient::request` for the purchase and sales screens.

pub mod purchases;
pub mod sales;

pub use purchases::{create_purchase_record, list_purchase_records, PurchaseRecord};
pub use sales::{create_sale, list_sales, Sale};

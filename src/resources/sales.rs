//! Sales (`/sales`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::RequestOptions;

pub const SALES_PATH: &str = "/sales";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

pub async fn list_sales(client: &ApiClient, token: Option<&str>) -> Result<Vec<Sale>> {
    client.request(SALES_PATH, RequestOptions::get(), token).await
}

/// Registers a sale. A successful sale clears every cached read,
/// including inventory and audit listings.
pub async fn create_sale<P: Serialize + ?Sized>(
    client: &ApiClient,
    payload: &P,
    token: Option<&str>,
) -> Result<Sale> {
    let options = RequestOptions::default()
        .method(reqwest::Method::POST)
        .json(payload)?;
    client.request(SALES_PATH, options, token).await
}

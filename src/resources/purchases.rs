//! Purchase records (`/purchases`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::RequestOptions;

pub const PURCHASES_PATH: &str = "/purchases";

/// A purchase record as returned by the API.
///
/// Only the id is typed; the remaining fields are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub id_compra: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Lists purchase records. Served from the read cache when fresh.
pub async fn list_purchase_records(
    client: &ApiClient,
    token: Option<&str>,
) -> Result<Vec<PurchaseRecord>> {
    client
        .request(PURCHASES_PATH, RequestOptions::get(), token)
        .await
}

/// Creates a purchase record. Clears the read cache on success.
pub async fn create_purchase_record<P: Serialize + ?Sized>(
    client: &ApiClient,
    payload: &P,
    token: Option<&str>,
) -> Result<PurchaseRecord> {
    let options = RequestOptions::default()
        .method(reqwest::Method::POST)
        .json(payload)?;
    client.request(PURCHASES_PATH, options, token).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_purchase_record_keeps_extra_fields() {
        let record: PurchaseRecord =
            serde_json::from_value(json!({"id_compra": 7001, "proveedor": "ACME", "total": 150.5}))
                .unwrap();
        assert_eq!(record.id_compra, 7001);
        assert_eq!(record.fields["proveedor"], "ACME");
        assert_eq!(serde_json::to_value(&record).unwrap()["total"], 150.5);
    }
}

//! Response models for the API client
//!
//! `HttpResponse` is what a transport returns; `Payload` is the interpreted
//! body that gets cached and shared between coalesced callers.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Result};

/// Raw HTTP response as produced by a transport.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// A JSON response with the given status.
    pub fn json(status: u16, value: &Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: value.to_string().into_bytes(),
        }
    }

    /// A response with no body, e.g. 204.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    /// A plain-text response.
    pub fn text(status: u16, text: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("text/plain; charset=utf-8".to_string()),
            body: text.into().into_bytes(),
        }
    }

    /// A response with an arbitrary content type.
    pub fn with_content_type(status: u16, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: Some(content_type.to_string()),
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the body should be parsed as JSON.
    ///
    /// A missing content type is treated as JSON.
    pub fn is_json(&self) -> bool {
        match &self.content_type {
            None => true,
            Some(ct) => {
                let mime = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
                mime == "application/json" || mime.ends_with("+json")
            }
        }
    }
}

// == Payload ==
/// Interpreted body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Parsed JSON; a 204 is `Value::Null`
    Json(Arc<Value>),
    /// Anything that is not JSON (PDF, CSV, images, ...). Never cached.
    Raw {
        content_type: String,
        body: Arc<[u8]>,
    },
}

impl Payload {
    /// Interprets a transport response.
    ///
    /// Non-2xx statuses become `ApiError::Status`; malformed JSON becomes
    /// `ApiError::Parse`.
    pub fn from_response(response: HttpResponse) -> Result<Self> {
        if !response.is_success() {
            return Err(ApiError::from_status(response.status, &response.body));
        }
        if response.status == 204 {
            return Ok(Payload::Json(Arc::new(Value::Null)));
        }
        if response.is_json() {
            let value: Value = serde_json::from_slice(&response.body)
                .map_err(|e| ApiError::Parse(e.to_string()))?;
            return Ok(Payload::Json(Arc::new(value)));
        }
        Ok(Payload::Raw {
            content_type: response.content_type.unwrap_or_default(),
            body: response.body.into(),
        })
    }

    /// Deserializes the payload into the caller's type.
    ///
    /// Textual raw bodies are exposed as a JSON string.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        match self {
            Payload::Json(value) => {
                T::deserialize(&**value).map_err(|e| ApiError::Decode(e.to_string()))
            }
            Payload::Raw { content_type, body } => {
                if !content_type.starts_with("text/") {
                    return Err(ApiError::Decode(format!(
                        "expected a JSON response, got '{}'",
                        content_type
                    )));
                }
                let text = String::from_utf8_lossy(body).into_owned();
                T::deserialize(Value::String(text)).map_err(|e| ApiError::Decode(e.to_string()))
            }
        }
    }
}

// == Download ==
/// Raw response body returned by `ApiClient::download`.
#[derive(Debug, Clone)]
pub struct Download {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_content_is_null() {
        let payload = Payload::from_response(HttpResponse::empty(204)).unwrap();
        assert_eq!(payload, Payload::Json(Arc::new(Value::Null)));
        payload.decode::<()>().unwrap();
        let nothing: Option<u32> = payload.decode().unwrap();
        assert!(nothing.is_none());
    }

    #[test]
    fn test_json_body_parsed() {
        let payload = Payload::from_response(HttpResponse::json(200, &json!([1, 2]))).unwrap();
        assert!(matches!(payload, Payload::Json(_)));
        let items: Vec<u32> = payload.decode().unwrap();
        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn test_vendor_json_content_type() {
        let response = HttpResponse::with_content_type(
            200,
            "application/problem+json; charset=utf-8",
            br#"{"ok":true}"#.to_vec(),
        );
        assert!(response.is_json());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let response = HttpResponse::with_content_type(200, "application/json", b"{oops".to_vec());
        assert!(matches!(Payload::from_response(response), Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_non_success_surfaces_body() {
        let err = Payload::from_response(HttpResponse::text(422, "Cantidad invalida")).unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 422,
                message: "Cantidad invalida".into()
            }
        );
    }

    #[test]
    fn test_binary_is_raw() {
        let response = HttpResponse::with_content_type(200, "application/pdf", vec![0x25, 0x50]);
        let payload = Payload::from_response(response).unwrap();
        assert!(matches!(payload, Payload::Raw { .. }));
        assert!(matches!(payload.decode::<String>(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_text_raw_decodes_as_string() {
        let payload = Payload::from_response(HttpResponse::text(200, "sku,qty\nA,1")).unwrap();
        let csv: String = payload.decode().unwrap();
        assert_eq!(csv, "sku,qty\nA,1");
    }

    #[test]
    fn test_decode_type_mismatch() {
        let payload = Payload::Json(Arc::new(json!({"id": "x"})));
        assert!(matches!(payload.decode::<Vec<u8>>(), Err(ApiError::Decode(_))));
    }
}

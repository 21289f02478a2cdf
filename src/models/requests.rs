//! Request models for the API client
//!
//! `RequestOptions` is what callers pass to `ApiClient::request`;
//! `HttpRequest` is the fully resolved request handed to a transport.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{ApiError, Result};

/// Per-call options for `ApiClient::request`.
///
/// # Fields
/// - `method`: HTTP method, GET unless set otherwise
/// - `query`: query parameters, in any order
/// - `body`: optional JSON body
/// - `headers`: extra request headers
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// A GET (read) request.
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self::default().method(Method::POST).body(body)
    }

    pub fn put(body: Value) -> Self {
        Self::default().method(Method::PUT).body(body)
    }

    pub fn patch(body: Value) -> Self {
        Self::default().method(Method::PATCH).body(body)
    }

    pub fn delete() -> Self {
        Self::default().method(Method::DELETE)
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes `payload` as the JSON body.
    pub fn json<B: Serialize + ?Sized>(self, payload: &B) -> Result<Self> {
        let body = serde_json::to_value(payload)
            .map_err(|e| ApiError::InvalidRequest(format!("body is not serializable: {}", e)))?;
        Ok(self.body(body))
    }

    /// True for the only verb that is cached and coalesced.
    pub fn is_read(&self) -> bool {
        self.method == Method::GET
    }
}

// == Http Request ==
/// A request ready to go on the wire.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer_token: Option<String>,
}

impl HttpRequest {
    /// Resolves `path` against `base_url` and appends the query parameters.
    ///
    /// `path` may already carry a query string; extra parameters are appended.
    pub fn build(
        base_url: &str,
        path: &str,
        options: &RequestOptions,
        token: Option<&str>,
    ) -> Result<Self> {
        let raw = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid URL '{}': {}", raw, e)))?;
        if !options.query.is_empty() {
            url.query_pairs_mut().extend_pairs(options.query.iter());
        }

        Ok(Self {
            method: options.method.clone(),
            url,
            headers: options.headers.clone(),
            body: options.body.clone(),
            bearer_token: token.map(str::to_owned),
        })
    }

    /// Path and query of the target URL, e.g. `/sales?page=2`.
    pub fn target(&self) -> String {
        match self.url.query() {
            Some(q) => format!("{}?{}", self.url.path(), q),
            None => self.url.path().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_default_to_read() {
        let options = RequestOptions::default();
        assert_eq!(options.method, Method::GET);
        assert!(options.is_read());
    }

    #[test]
    fn test_mutating_constructors() {
        assert!(!RequestOptions::post(json!({})).is_read());
        assert!(!RequestOptions::put(json!({})).is_read());
        assert!(!RequestOptions::patch(json!({})).is_read());
        assert!(!RequestOptions::delete().is_read());
    }

    #[test]
    fn test_json_body() {
        #[derive(Serialize)]
        struct Line {
            sku: &'static str,
            qty: u32,
        }
        let options = RequestOptions::default()
            .method(Method::POST)
            .json(&Line { sku: "A-1", qty: 3 })
            .unwrap();
        assert_eq!(options.body, Some(json!({"sku": "A-1", "qty": 3})));
    }

    #[test]
    fn test_build_joins_base_and_path() {
        let options = RequestOptions::get().query("page", 2);
        let req = HttpRequest::build("http://api.local/v1/", "/sales", &options, Some("tok")).unwrap();
        assert_eq!(req.url.as_str(), "http://api.local/v1/sales?page=2");
        assert_eq!(req.target(), "/v1/sales?page=2");
        assert_eq!(req.bearer_token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_build_keeps_inline_query() {
        let options = RequestOptions::get().query("b", "2");
        let req = HttpRequest::build("http://api.local", "inventory?a=1", &options, None).unwrap();
        assert_eq!(req.url.query(), Some("a=1&b=2"));
    }

    #[test]
    fn test_build_invalid_base() {
        let result = HttpRequest::build("nope", "/x", &RequestOptions::get(), None);
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }
}

//! Cache Key Module
//!
//! Derives the canonical identity of a read request.

use reqwest::Method;
use url::form_urlencoded;

// == Build Key ==
/// Builds the cache key for a read request.
///
/// Query parameters given inline in `path` and in `query` are merged, then
/// sorted by name and value, so the key does not depend on the order in
/// which callers supplied them. The format is `METHOD /path?a=1&b=2`.
///
/// # Arguments
/// * `method` - The HTTP method (only GET requests are ever keyed)
/// * `path` - Request path, optionally with a query string
/// * `query` - Additional query parameters
pub fn build_key(method: &Method, path: &str, query: &[(String, String)]) -> String {
    let (route, inline) = match path.split_once('?') {
        Some((route, qs)) => (route, qs),
        None => (path, ""),
    };

    let mut params: Vec<(String, String)> = form_urlencoded::parse(inline.as_bytes())
        .into_owned()
        .chain(query.iter().cloned())
        .collect();
    params.sort();

    let route = format!("/{}", route.trim_start_matches('/'));
    if params.is_empty() {
        return format!("{} {}", method, route);
    }

    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{} {}?{}", method, route, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_key_without_query() {
        assert_eq!(build_key(&Method::GET, "/sales", &[]), "GET /sales");
    }

    #[test]
    fn test_key_leading_slash_is_normalized() {
        assert_eq!(
            build_key(&Method::GET, "sales", &[]),
            build_key(&Method::GET, "/sales", &[])
        );
    }

    #[test]
    fn test_key_sorts_parameters() {
        let a = build_key(&Method::GET, "/inventory", &q(&[("page", "2"), ("branch", "7")]));
        let b = build_key(&Method::GET, "/inventory", &q(&[("branch", "7"), ("page", "2")]));
        assert_eq!(a, b);
        assert_eq!(a, "GET /inventory?branch=7&page=2");
    }

    #[test]
    fn test_key_merges_inline_query() {
        let inline = build_key(&Method::GET, "/inventory?page=2", &q(&[("branch", "7")]));
        let explicit = build_key(&Method::GET, "/inventory", &q(&[("page", "2"), ("branch", "7")]));
        assert_eq!(inline, explicit);
    }

    #[test]
    fn test_key_distinguishes_values() {
        let a = build_key(&Method::GET, "/sales", &q(&[("page", "1")]));
        let b = build_key(&Method::GET, "/sales", &q(&[("page", "2")]));
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_encodes_separators() {
        let key = build_key(&Method::GET, "/products", &q(&[("q", "a&b=c")]));
        assert_eq!(key, "GET /products?q=a%26b%3Dc");
    }

    #[test]
    fn test_key_empty_inline_query() {
        assert_eq!(build_key(&Method::GET, "/sales?", &[]), "GET /sales");
    }
}

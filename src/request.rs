//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;

/// An incoming HTTP request with its body fully collected.
///
/// The path is kept exactly as it arrived on the wire (still URL-encoded);
/// decoding is left to whoever maps it onto something, once.
pub struct Request {
    pub(crate) method: http::Method,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn from_parts(parts: http::request::Parts, body: Bytes) -> Self {
        let headers = parts.headers.iter()
            .filter_map(|(k, v)| Some((k.as_str().to_owned(), v.to_str().ok()?.to_owned())))
            .collect();
        Self {
            method: parts.method,
            path: parts.uri.path().to_owned(),
            query: parts.uri.query().map(str::to_owned),
            headers,
            body,
            params: HashMap::new(),
        }
    }

    pub fn method(&self) -> &http::Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn query(&self) -> Option<&str> { self.query.as_deref() }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/api/{name}`, `req.param("name")` on `/api/ping` returns `Some("ping")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

#[cfg(test)]
impl Request {
    /// Bodyless request for `uri`, the way the server would build it.
    pub(crate) fn test(method: http::Method, uri: &str) -> Self {
        let (parts, ()) = http::Request::builder()
            .method(method)
            .uri(uri)
            .body(())
            .expect("valid test request")
            .into_parts();
        Self::from_parts(parts, Bytes::new())
    }

    pub(crate) fn get(uri: &str) -> Self {
        Self::test(http::Method::GET, uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_raw_path_and_splits_query() {
        let req = Request::get("/a%20b/c?x=1");
        assert_eq!(req.path(), "/a%20b/c");
        assert_eq!(req.query(), Some("x=1"));
    }

    #[test]
    fn header_lookup_ignores_case() {
        let (parts, ()) = http::Request::builder()
            .uri("/")
            .header("X-Trace", "abc")
            .body(())
            .unwrap()
            .into_parts();
        let req = Request::from_parts(parts, Bytes::new());
        assert_eq!(req.header("x-trace"), Some("abc"));
        assert_eq!(req.header("missing"), None);
    }
}

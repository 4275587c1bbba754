// HTTP request and response types

use crate::{Error, Extensions};
use ::http::Uri;
use std::collections::HashMap;

/// HTTP request wrapper
///
/// `extensions` carries typed request-scoped values (see [`Extensions`]).
/// Cloning a request is the way to derive a new one without touching the
/// original.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub query_params: HashMap<String, String>,
    pub extensions: Extensions,
}

impl HttpRequest {
    pub fn new(method: String, path: String) -> Self {
        Self {
            method,
            path,
            headers: HashMap::new(),
            query_params: HashMap::new(),
            extensions: Extensions::new(),
        }
    }

    /// Build a request from a method and a URI.
    ///
    /// Accepts absolute (`https://host/path?q`) and origin-form (`/path?q`)
    /// URIs. The query string is form-decoded; a bare key such as
    /// `?feature-paginate` decodes to an empty value. When a key repeats, the
    /// first value is kept.
    ///
    /// ```rust
    /// use flagwire_core::HttpRequest;
    ///
    /// let req = HttpRequest::from_uri("GET", "https://example.com/items?feature-paginate").unwrap();
    /// assert_eq!(req.path, "/items");
    /// assert_eq!(req.query("feature-paginate").map(String::as_str), Some(""));
    /// ```
    pub fn from_uri(method: &str, uri: &str) -> Result<Self, Error> {
        let uri: Uri = uri
            .parse()
            .map_err(|e| Error::BadRequest(format!("invalid URI: {}", e)))?;

        let pairs: Vec<(String, String)> = match uri.query() {
            Some(query) => serde_urlencoded::from_str(query)
                .map_err(|e| Error::BadRequest(format!("invalid query string: {}", e)))?,
            None => Vec::new(),
        };

        let path = match uri.path() {
            "" => "/",
            path => path,
        };
        let mut req = Self::new(method.to_ascii_uppercase(), path.to_string());
        for (key, value) in pairs {
            req.query_params.entry(key).or_insert(value);
        }

        Ok(req)
    }

    /// Set a header, builder style.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set a query parameter, builder style.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    /// Get a header by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Get a query parameter by name
    pub fn query(&self, name: &str) -> Option<&String> {
        self.query_params.get(name)
    }
}

/// HTTP response wrapper
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(200)
    }

    pub fn not_found() -> Self {
        Self::new(404)
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_header(
            "Content-Type".to_string(),
            "text/plain; charset=utf-8".to_string(),
        )
        .with_body(text.into().into_bytes())
    }

    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }
}

impl From<&Error> for HttpResponse {
    fn from(err: &Error) -> Self {
        HttpResponse::new(err.status_code()).with_text(err.to_string())
    }
}

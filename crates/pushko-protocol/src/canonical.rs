//! Canonical string-to-sign construction.
//!
//! The signed form of a request is
//!
//! ```text
//! METHOD "\n" PATH "\n" key1=value1&key2=value2...
//! ```
//!
//! with parameters sorted by key in byte-wise ascending order. Values are
//! taken verbatim; any URL encoding happens after signing.

use std::collections::BTreeMap;
use std::fmt;

/// Query parameters of a request.
///
/// A `BTreeMap<String, String>` iterates in byte-wise key order, which is
/// exactly the ordering the protocol requires.
pub type QueryParams = BTreeMap<String, String>;

/// HTTP methods used by the REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Upper-case wire form of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request that has not been signed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignableRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request path, e.g. `/apps/1/events`.
    pub path: String,
    /// Extra query parameters to sign alongside the auth parameters.
    pub params: QueryParams,
}

impl SignableRequest {
    /// Create a new request with no extra parameters.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: QueryParams::new(),
        }
    }

    /// Create a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Create a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Add a query parameter. A later value for the same key replaces the earlier one.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Canonical string-to-sign over this request's own parameters.
    #[must_use]
    pub fn string_to_sign(&self) -> String {
        string_to_sign(self.method, &self.path, &self.params)
    }
}

/// Join parameters as `key=value` pairs separated by `&`, in key order.
#[must_use]
pub fn canonical_query(params: &QueryParams) -> String {
    let mut query = String::new();
    for (key, value) in params {
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(key);
        query.push('=');
        query.push_str(value);
    }
    query
}

/// Build the exact string the HMAC is computed over.
#[must_use]
pub fn string_to_sign(method: Method, path: &str, params: &QueryParams) -> String {
    format!("{}\n{}\n{}", method, path, canonical_query(params))
}

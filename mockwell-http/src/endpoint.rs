//! Endpoint descriptors: one matchable request paired with its response.

use crate::types::{HttpRequest, HttpResponse};
use http::header::HeaderName;
use http::{Method, StatusCode};
use std::fmt;

/// What a matched endpoint answers with.
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointResponse {
    /// A body and status; headers are left empty.
    Body {
        /// Response body text.
        text: String,
        /// Response status.
        status: StatusCode,
    },
    /// A fully specified response, returned as-is.
    Full(HttpResponse),
}

impl EndpointResponse {
    /// Build the response handed back to the caller.
    pub fn to_response(&self) -> HttpResponse {
        match self {
            Self::Body { text, status } => HttpResponse::new(*status, text.clone()),
            Self::Full(response) => response.clone(),
        }
    }
}

impl Default for EndpointResponse {
    fn default() -> Self {
        Self::Body {
            text: String::new(),
            status: StatusCode::OK,
        }
    }
}

/// Registration of a single request/response pair.
///
/// A request matches when `base_address + path` equals its URL exactly, the
/// methods are equal, and every expected header is present with a value
/// containing the expected text.
///
/// # Example
///
/// ```
/// use http::{header, StatusCode};
/// use mockwell_http::{EndpointDescriptor, HttpRequest};
///
/// let endpoint = EndpointDescriptor::get("https://host", "/data")
///     .expect_header(header::ACCEPT, "application/json")
///     .respond(r#"{"name":"X"}"#, StatusCode::OK);
///
/// let request = HttpRequest::get("https://host/data")
///     .header("Accept", "application/json, text/plain")
///     .unwrap();
/// assert!(endpoint.matches(&request));
/// assert!(!endpoint.matches(&HttpRequest::get("https://host/data")));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EndpointDescriptor {
    /// Method to match. Registration fails while unset.
    pub method: Option<Method>,
    /// Base address, e.g. `https://api.example.com`.
    pub base_address: String,
    /// Path appended to the base address, e.g. `/users/1`.
    pub path: String,
    /// Headers that must be present, with a substring of their value.
    pub expected_headers: Vec<(HeaderName, String)>,
    /// Response returned on match.
    pub response: EndpointResponse,
}

impl EndpointDescriptor {
    /// Create a descriptor with no method yet.
    pub fn new(base_address: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_address: base_address.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Create a GET descriptor.
    pub fn get(base_address: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(base_address, path).with_method(Method::GET)
    }

    /// Create a POST descriptor.
    pub fn post(base_address: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(base_address, path).with_method(Method::POST)
    }

    /// Create a PUT descriptor.
    pub fn put(base_address: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(base_address, path).with_method(Method::PUT)
    }

    /// Create a DELETE descriptor.
    pub fn delete(base_address: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(base_address, path).with_method(Method::DELETE)
    }

    /// Set the method to match.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Require `name` to be present with a value containing `value`.
    pub fn expect_header(mut self, name: HeaderName, value: impl Into<String>) -> Self {
        self.expected_headers.push((name, value.into()));
        self
    }

    /// Answer with `text` and `status`.
    pub fn respond(mut self, text: impl Into<String>, status: StatusCode) -> Self {
        self.response = EndpointResponse::Body {
            text: text.into(),
            status,
        };
        self
    }

    /// Answer with a JSON body.
    pub fn respond_json(self, status: StatusCode, value: &serde_json::Value) -> Self {
        self.respond_with(HttpResponse::json(status, value))
    }

    /// Answer with a fully specified response.
    pub fn respond_with(mut self, response: HttpResponse) -> Self {
        self.response = EndpointResponse::Full(response);
        self
    }

    /// The full URL this endpoint answers.
    pub fn url(&self) -> String {
        format!("{}{}", self.base_address, self.path)
    }

    /// Fields that must be supplied before registration.
    ///
    /// Empty when the descriptor is valid.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.method.is_none() {
            missing.push("method");
        }
        if self.base_address.trim().is_empty() && self.path.trim().is_empty() {
            missing.push("address");
        }
        missing
    }

    /// Check whether `request` satisfies this endpoint.
    pub fn matches(&self, request: &HttpRequest) -> bool {
        let Some(method) = &self.method else {
            return false;
        };
        if *method != request.method {
            return false;
        }
        // Same as comparing against `url()`, without allocating.
        if request.url.len() != self.base_address.len() + self.path.len()
            || !request.url.starts_with(&self.base_address)
            || !request.url.ends_with(&self.path)
        {
            return false;
        }

        self.expected_headers.iter().all(|(name, expected)| {
            request
                .headers
                .get_all(name)
                .iter()
                .any(|v| contains_bytes(v.as_bytes(), expected.as_bytes()))
        })
    }
}

// Header values may carry opaque non-ASCII bytes, so compare raw bytes.
fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

impl fmt::Display for EndpointDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.method {
            Some(method) => write!(f, "{} {}", method, self.url()),
            None => write!(f, "<no method> {}", self.url()),
        }
    }
}

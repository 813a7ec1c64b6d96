//! Client-side seams: the provider trait code under test calls, and the
//! factory it obtains named clients from.

use crate::dispatcher::MockHttp;
use crate::error::HttpError;
use crate::types::{HttpRequest, HttpResponse};
use http::Method;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by [`HttpProvider`] methods.
pub type ResponseFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;

/// Provider trait for HTTP operations.
///
/// Code under test depends on this trait; tests hand it a
/// [`MockHttpClient`].
pub trait HttpProvider: Send + Sync {
    /// Send a request.
    fn send(&self, request: HttpRequest) -> ResponseFuture<'_>;

    /// Check if this is a mock provider.
    fn is_mock(&self) -> bool;

    /// Send a GET request.
    fn get(&self, url: &str) -> ResponseFuture<'_> {
        self.send(HttpRequest::new(Method::GET, url))
    }

    /// Send a POST request with `body`.
    fn post(&self, url: &str, body: Vec<u8>) -> ResponseFuture<'_> {
        self.send(HttpRequest::new(Method::POST, url).with_body(body))
    }

    /// Send a PUT request with `body`.
    fn put(&self, url: &str, body: Vec<u8>) -> ResponseFuture<'_> {
        self.send(HttpRequest::new(Method::PUT, url).with_body(body))
    }

    /// Send a DELETE request.
    fn delete(&self, url: &str) -> ResponseFuture<'_> {
        self.send(HttpRequest::new(Method::DELETE, url))
    }
}

/// Source of named HTTP clients.
pub trait HttpClientFactory: Send + Sync {
    /// A client whose requests go through the channel called `name`.
    fn create_client(&self, name: &str) -> Arc<dyn HttpProvider>;
}

/// A client bound to one channel of a [`MockHttp`].
///
/// Default headers are added to every request that does not already carry
/// a header of the same name.
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    http: MockHttp,
    channel: String,
    default_headers: HeaderMap,
}

impl MockHttpClient {
    pub(crate) fn new(http: MockHttp, channel: String) -> Self {
        Self {
            http,
            channel,
            default_headers: HeaderMap::new(),
        }
    }

    /// The channel this client dispatches on.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Add a header sent with every request.
    pub fn with_default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.default_headers.append(name, value);
        self
    }

    /// Headers sent with every request.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Dispatch synchronously.
    pub fn dispatch(&self, mut request: HttpRequest) -> Result<HttpResponse, HttpError> {
        for name in self.default_headers.keys() {
            if request.headers.contains_key(name) {
                continue;
            }
            for value in self.default_headers.get_all(name) {
                request.headers.append(name.clone(), value.clone());
            }
        }
        self.http.dispatch(&self.channel, &request)
    }
}

impl HttpProvider for MockHttpClient {
    fn send(&self, request: HttpRequest) -> ResponseFuture<'_> {
        let result = self.dispatch(request);
        Box::pin(async move { result })
    }

    fn is_mock(&self) -> bool {
        true
    }
}

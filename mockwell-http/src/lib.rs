//! Request-matching HTTP dispatcher for tests.
//!
//! Code that talks HTTP through [`HttpProvider`] (or obtains named clients
//! from an [`HttpClientFactory`]) can be handed a [`MockHttp`] dispatcher.
//! Each registered [`EndpointDescriptor`] pairs an exact URL, a method and a
//! set of expected headers with a canned response. Requests that match no
//! endpoint fail with [`HttpError::NoMockMatch`] instead of reaching the
//! network, and every dispatch lands in a [`MatchLog`] for later
//! verification.
//!
//! # Example
//!
//! ```
//! use http::{header, StatusCode};
//! use mockwell_http::prelude::*;
//! use serde_json::json;
//!
//! # futures::executor::block_on(async {
//! let mock = MockHttp::builder()
//!     .channel("github", [
//!         EndpointDescriptor::get("https://api.github.com", "/user")
//!             .expect_header(header::ACCEPT, "application/json")
//!             .respond_json(StatusCode::OK, &json!({"login": "ada"})),
//!     ])
//!     .build()
//!     .unwrap();
//!
//! let client = mock
//!     .client_for("github")
//!     .with_default_header(header::ACCEPT, "application/json".parse().unwrap());
//! let response = client.get("https://api.github.com/user").await.unwrap();
//! assert_eq!(response.body_json().unwrap()["login"], "ada");
//!
//! mock.verify_all().unwrap();
//! # });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod endpoint;
pub mod error;
pub mod match_log;
pub mod prelude;
pub mod types;

pub use client::{HttpClientFactory, HttpProvider, MockHttpClient, ResponseFuture};
pub use config::DispatcherConfig;
pub use dispatcher::{MockHttp, MockHttpBuilder};
pub use endpoint::{EndpointDescriptor, EndpointResponse};
pub use error::{ConfigError, HttpError};
pub use match_log::{MatchLog, MatchRecord};
pub use types::{HttpRequest, HttpResponse};

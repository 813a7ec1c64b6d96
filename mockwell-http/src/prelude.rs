//! Convenient re-exports for tests.
//!
//! ```
//! use mockwell_http::prelude::*;
//! ```

pub use crate::client::{HttpClientFactory, HttpProvider, MockHttpClient};
pub use crate::config::DispatcherConfig;
pub use crate::dispatcher::MockHttp;
pub use crate::endpoint::EndpointDescriptor;
pub use crate::error::{ConfigError, HttpError};
pub use crate::match_log::MatchRecord;
pub use crate::types::{HttpRequest, HttpResponse};
pub use mockwell_core::Times;

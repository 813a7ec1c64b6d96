//! The request-matching dispatcher.

use crate::client::{HttpClientFactory, HttpProvider, MockHttpClient, ResponseFuture};
use crate::config::DispatcherConfig;
use crate::endpoint::EndpointDescriptor;
use crate::error::{ConfigError, HttpError};
use crate::match_log::{MatchLog, MatchRecord};
use crate::types::{HttpRequest, HttpResponse};
use http::Method;
use mockwell_core::{Times, VerifyError};
use regex::Regex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Channel {
    name: String,
    endpoints: Vec<EndpointDescriptor>,
    hits: Vec<AtomicUsize>,
}

impl Channel {
    fn subject(&self, index: usize) -> String {
        match self.endpoints.get(index) {
            Some(endpoint) => format!("endpoint {index} ({endpoint}) on channel {:?}", self.name),
            None => format!("endpoint {index} on channel {:?}", self.name),
        }
    }
}

struct Inner {
    channels: Vec<Channel>,
    config: DispatcherConfig,
    log: MatchLog,
}

impl Inner {
    fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.name == name)
    }
}

/// Mock HTTP dispatcher.
///
/// Holds one or more channels of [`EndpointDescriptor`]s, fixed at
/// construction. Each request is matched against its channel's endpoints in
/// registration order and answered by the first match; a request nothing
/// matches fails with [`HttpError::NoMockMatch`].
///
/// Handles are cheap to clone and share the same registrations, hit
/// counters and match log.
///
/// # Example
///
/// ```
/// use http::StatusCode;
/// use mockwell_http::{EndpointDescriptor, HttpRequest, MockHttp};
///
/// let mock = MockHttp::new([
///     EndpointDescriptor::get("https://api.example.com", "/users/1")
///         .respond(r#"{"name":"Alice"}"#, StatusCode::OK),
///     EndpointDescriptor::post("https://api.example.com", "/users")
///         .respond("", StatusCode::CREATED),
/// ])
/// .unwrap();
///
/// let response = mock
///     .dispatch("", &HttpRequest::get("https://api.example.com/users/1"))
///     .unwrap();
/// assert_eq!(response.status, StatusCode::OK);
/// assert!(mock.dispatch("", &HttpRequest::get("https://api.example.com/users/2")).is_err());
/// assert_eq!(mock.request_count(), 2);
/// ```
#[derive(Clone)]
pub struct MockHttp {
    inner: Arc<Inner>,
}

impl MockHttp {
    /// Register `endpoints` on the default channel.
    pub fn new(
        endpoints: impl IntoIterator<Item = EndpointDescriptor>,
    ) -> Result<Self, ConfigError> {
        Self::builder().endpoints(endpoints).build()
    }

    /// Start building a dispatcher with several channels.
    pub fn builder() -> MockHttpBuilder {
        MockHttpBuilder::new()
    }

    /// The configuration this dispatcher was built with.
    pub fn config(&self) -> &DispatcherConfig {
        &self.inner.config
    }

    /// Registered channel names, in registration order.
    pub fn channels(&self) -> Vec<String> {
        self.inner.channels.iter().map(|c| c.name.clone()).collect()
    }

    /// Endpoints registered on `channel`.
    pub fn endpoints(&self, channel: &str) -> Option<&[EndpointDescriptor]> {
        self.inner.channel(channel).map(|c| c.endpoints.as_slice())
    }

    /// Resolve `request` on `channel`.
    ///
    /// Every call is recorded in the match log, matched or not.
    pub fn dispatch(
        &self,
        channel: &str,
        request: &HttpRequest,
    ) -> Result<HttpResponse, HttpError> {
        let matched = self.inner.channel(channel).and_then(|c| {
            c.endpoints
                .iter()
                .position(|e| e.matches(request))
                .map(|index| (c, index))
        });

        match matched {
            Some((c, index)) => {
                c.hits[index].fetch_add(1, Ordering::SeqCst);
                self.inner.log.record(channel, request, Some(index));
                tracing::debug!(
                    channel,
                    method = %request.method,
                    url = %request.url,
                    endpoint = index,
                    "Mock endpoint matched"
                );
                Ok(c.endpoints[index].response.to_response())
            }
            None => {
                self.inner.log.record(channel, request, None);
                tracing::warn!(
                    channel,
                    method = %request.method,
                    url = %request.url,
                    "No mock endpoint matched"
                );
                Err(HttpError::NoMockMatch {
                    channel: channel.to_string(),
                    method: request.method.to_string(),
                    url: request.url.clone(),
                })
            }
        }
    }

    /// A client bound to the default channel.
    pub fn client(&self) -> MockHttpClient {
        self.client_for(self.inner.config.default_channel.clone())
    }

    /// A client bound to `channel`.
    ///
    /// The channel need not exist; requests through it then never match.
    pub fn client_for(&self, channel: impl Into<String>) -> MockHttpClient {
        MockHttpClient::new(self.clone(), channel.into())
    }

    /// The match log.
    pub fn match_log(&self) -> &MatchLog {
        &self.inner.log
    }

    /// Every recorded request, in dispatch order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner
            .log
            .records()
            .into_iter()
            .map(|r| r.request)
            .collect()
    }

    /// Every recorded dispatch with its resolution.
    pub fn records(&self) -> Vec<MatchRecord> {
        self.inner.log.records()
    }

    /// Number of recorded requests. Zero while recording is disabled.
    pub fn request_count(&self) -> usize {
        self.inner.log.len()
    }

    /// Recorded requests no endpoint answered.
    pub fn unmatched(&self) -> Vec<MatchRecord> {
        self.inner.log.unmatched()
    }

    /// How many requests endpoint `index` of `channel` has answered.
    pub fn hits(&self, channel: &str, index: usize) -> usize {
        self.inner
            .channel(channel)
            .and_then(|c| c.hits.get(index))
            .map(|h| h.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Verify how many requests endpoint `index` of `channel` has answered.
    pub fn verify(&self, channel: &str, index: usize, times: Times) -> Result<(), VerifyError> {
        let subject = match self.inner.channel(channel) {
            Some(c) => c.subject(index),
            None => format!("endpoint {} on channel {:?}", index, channel),
        };
        VerifyError::check(subject, times, self.hits(channel, index))
    }

    /// Verify that every registered endpoint answered at least one request.
    pub fn verify_all(&self) -> Result<(), VerifyError> {
        let subjects: Vec<String> = self
            .inner
            .channels
            .iter()
            .flat_map(|c| {
                c.hits
                    .iter()
                    .enumerate()
                    .filter(|(_, h)| h.load(Ordering::SeqCst) == 0)
                    .map(move |(index, _)| c.subject(index))
            })
            .collect();

        if subjects.is_empty() {
            Ok(())
        } else {
            Err(VerifyError::NeverInvoked { subjects })
        }
    }

    /// Check whether a request with `method` and a URL matching `url_pattern`
    /// was recorded.
    pub fn assert_request_made(
        &self,
        method: &Method,
        url_pattern: &str,
    ) -> Result<bool, regex::Error> {
        let re = Regex::new(url_pattern)?;
        Ok(self
            .inner
            .log
            .records()
            .iter()
            .any(|r| r.request.method == *method && re.is_match(&r.request.url)))
    }

    /// Clear the match log and reset every hit counter.
    pub fn clear_log(&self) {
        self.inner.log.clear();
        for channel in &self.inner.channels {
            for hits in &channel.hits {
                hits.store(0, Ordering::SeqCst);
            }
        }
    }
}

impl HttpClientFactory for MockHttp {
    fn create_client(&self, name: &str) -> Arc<dyn HttpProvider> {
        Arc::new(self.client_for(name))
    }
}

impl HttpProvider for MockHttp {
    fn send(&self, request: HttpRequest) -> ResponseFuture<'_> {
        let result = self.dispatch(&self.inner.config.default_channel, &request);
        Box::pin(async move { result })
    }

    fn is_mock(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for MockHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockHttp")
            .field("channels", &self.channels())
            .field("config", &self.inner.config)
            .field("log", &self.inner.log)
            .finish()
    }
}

/// Builder for a [`MockHttp`] with named channels.
///
/// Nothing is validated until [`build`](Self::build).
#[derive(Debug, Default)]
pub struct MockHttpBuilder {
    config: DispatcherConfig,
    pending: Vec<(Option<String>, Vec<EndpointDescriptor>)>,
}

impl MockHttpBuilder {
    /// Create an empty builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Add one endpoint to the default channel.
    pub fn endpoint(self, endpoint: EndpointDescriptor) -> Self {
        self.endpoints([endpoint])
    }

    /// Add endpoints to the default channel.
    pub fn endpoints(mut self, endpoints: impl IntoIterator<Item = EndpointDescriptor>) -> Self {
        match self.pending.iter_mut().find(|(name, _)| name.is_none()) {
            Some((_, existing)) => existing.extend(endpoints),
            None => self.pending.push((None, endpoints.into_iter().collect())),
        }
        self
    }

    /// Register a named channel.
    pub fn channel(
        mut self,
        name: impl Into<String>,
        endpoints: impl IntoIterator<Item = EndpointDescriptor>,
    ) -> Self {
        self.pending
            .push((Some(name.into()), endpoints.into_iter().collect()));
        self
    }

    /// Validate every registration and build the dispatcher.
    pub fn build(self) -> Result<MockHttp, ConfigError> {
        let default_channel = self.config.default_channel.clone();
        if self.pending.is_empty() {
            return Err(ConfigError::NoEndpoints {
                channel: default_channel,
            });
        }

        let mut channels: Vec<Channel> = Vec::with_capacity(self.pending.len());
        for (name, endpoints) in self.pending {
            let name = name.unwrap_or_else(|| default_channel.clone());
            if channels.iter().any(|c| c.name == name) {
                return Err(ConfigError::DuplicateChannel(name));
            }
            if endpoints.is_empty() {
                return Err(ConfigError::NoEndpoints { channel: name });
            }
            for (index, endpoint) in endpoints.iter().enumerate() {
                let missing = endpoint.missing_fields();
                if !missing.is_empty() {
                    return Err(ConfigError::InvalidEndpoint {
                        channel: name,
                        index,
                        missing: missing.join(", "),
                    });
                }
            }

            let hits = endpoints.iter().map(|_| AtomicUsize::new(0)).collect();
            channels.push(Channel {
                name,
                endpoints,
                hits,
            });
        }

        let log = MatchLog::new();
        log.set_enabled(self.config.record_requests);

        tracing::debug!(
            channels = channels.len(),
            endpoints = channels.iter().map(|c| c.endpoints.len()).sum::<usize>(),
            "Mock HTTP dispatcher configured"
        );

        Ok(MockHttp {
            inner: Arc::new(Inner {
                channels,
                config: self.config,
                log,
            }),
        })
    }
}

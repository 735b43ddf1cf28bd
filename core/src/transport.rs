//! The asynchronous transport collaborator.
//!
//! # Design
//! A `Transport` starts a request and reports the outcome later through a
//! `Completion`, on whatever thread it likes. `Completion` is `FnOnce`, so a
//! transport cannot deliver twice.
//!
//! `UreqTransport` is the stock implementation: each request runs on its own
//! worker thread with a shared `ureq::Agent`. The agent is configured not to
//! treat 4xx/5xx as errors, so status classification happens in
//! `RequestResult` and only connection-level failures become
//! `TransportError`s.

use std::fmt;
use std::thread;

use ureq::Agent;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponseHead, ResponseMeta};

/// Callback invoked exactly once with `(body, response metadata, error)`.
pub type Completion =
    Box<dyn FnOnce(Option<Vec<u8>>, Option<ResponseMeta>, Option<TransportError>) + Send + 'static>;

/// An asynchronous request API.
pub trait Transport: Send + Sync {
    /// Start `request` and eventually call `on_complete` exactly once.
    fn issue(&self, request: HttpRequest, on_complete: Completion);
}

impl<T: Transport + ?Sized> Transport for &T {
    fn issue(&self, request: HttpRequest, on_complete: Completion) {
        (**self).issue(request, on_complete)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn issue(&self, request: HttpRequest, on_complete: Completion) {
        (**self).issue(request, on_complete)
    }
}

/// Runs requests with `ureq` on background threads.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
    body_limit: u64,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("body_limit", &self.body_limit)
            .finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self::with_agent(agent)
    }

    /// Use a caller-configured agent (timeouts, proxy, TLS).
    ///
    /// The agent should be built with `http_status_as_error(false)`; otherwise
    /// error statuses arrive as transport errors instead of `BadHttpStatus`.
    pub fn with_agent(agent: Agent) -> Self {
        Self {
            agent,
            body_limit: u64::MAX,
        }
    }

    /// Cap the number of body bytes buffered per response. Unlimited by default.
    pub fn with_body_limit(mut self, limit: u64) -> Self {
        self.body_limit = limit;
        self
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn issue(&self, request: HttpRequest, on_complete: Completion) {
        let agent = self.agent.clone();
        let body_limit = self.body_limit;
        thread::spawn(move || {
            let (data, response, error) = execute(&agent, body_limit, request);
            on_complete(data, response, error);
        });
    }
}

/// Perform the round-trip and buffer the whole body.
///
/// A body that fails to read after the head arrived is reported together
/// with that head.
fn execute(
    agent: &Agent,
    body_limit: u64,
    request: HttpRequest,
) -> (Option<Vec<u8>>, Option<ResponseMeta>, Option<TransportError>) {
    let HttpRequest {
        id,
        method,
        url,
        headers,
        body,
    } = request;

    let response = match (method, body) {
        (HttpMethod::Get, _) => with_headers(agent.get(&url), &headers).call(),
        (HttpMethod::Delete, _) => with_headers(agent.delete(&url), &headers).call(),
        (HttpMethod::Post, Some(body)) => with_headers(agent.post(&url), &headers).send(&body[..]),
        (HttpMethod::Post, None) => with_headers(agent.post(&url), &headers).send_empty(),
        (HttpMethod::Put, Some(body)) => with_headers(agent.put(&url), &headers).send(&body[..]),
        (HttpMethod::Put, None) => with_headers(agent.put(&url), &headers).send_empty(),
    };

    let mut response = match response {
        Ok(response) => response,
        Err(err) => {
            log::warn!("request {id} to {url} failed: {err}");
            return (None, None, Some(err.into()));
        }
    };

    let head = HttpResponseHead {
        status: response.status().as_u16(),
        headers: response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect(),
    };

    match response.body_mut().with_config().limit(body_limit).read_to_vec() {
        Ok(body) => (Some(body), Some(ResponseMeta::Http(head)), None),
        Err(err) => {
            log::warn!("request {id} to {url}: reading body failed: {err}");
            (None, Some(ResponseMeta::Http(head)), Some(err.into()))
        }
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

//! HTTP request and response metadata as plain data.
//!
//! # Design
//! An `HttpRequest` describes what the transport should send. It carries a
//! generated `id` so a `RequestResult` can point back at the request that
//! produced it, whether it came from the network or from a cassette.
//!
//! `ResponseMeta` is what the transport reports about the response besides
//! the body. Transports that can serve non-HTTP URLs report `NonHttp`, which
//! the result accessors classify as `NotHttpResponse`.

use serde::Serialize;
use uuid::Uuid;

use crate::error::RequestError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A request descriptor handed to a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub id: Uuid,
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON request body and set the content type.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, RequestError> {
        let body = serde_json::to_vec(value)?;
        Ok(self.header("content-type", "application/json").body(body))
    }
}

/// Status line and headers of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponseHead {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl HttpResponseHead {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
        }
    }

    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response metadata reported by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseMeta {
    Http(HttpResponseHead),
    /// Metadata for a response that did not come from an HTTP exchange.
    NonHttp { url: String },
}

impl ResponseMeta {
    pub fn as_http(&self) -> Option<&HttpResponseHead> {
        match self {
            ResponseMeta::Http(head) => Some(head),
            ResponseMeta::NonHttp { .. } => None,
        }
    }
}

impl From<HttpResponseHead> for ResponseMeta {
    fn from(head: HttpResponseHead) -> Self {
        ResponseMeta::Http(head)
    }
}

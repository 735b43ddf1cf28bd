//! Error taxonomy for request results.
//!
//! # Design
//! `RequestError` is a closed set: every accessor on `RequestResult` either
//! returns a value or exactly one of these variants. Variants carry only the
//! data needed to act on them; `BadHttpStatus` keeps the status code and a
//! best-effort decoding of the body for diagnostics.
//!
//! Transport failures are opaque. `TransportError` shares the underlying error
//! behind an `Arc` so a result can hand the same error out on every call
//! without consuming itself.

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

/// An opaque failure reported by a transport.
#[derive(Debug, Clone, Error)]
#[error(transparent)]
pub struct TransportError(Arc<dyn StdError + Send + Sync>);

impl TransportError {
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Arc::new(err))
    }

    /// Build a transport error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        let boxed: Box<dyn StdError + Send + Sync> = message.into().into();
        Self(Arc::from(boxed))
    }

    /// The wrapped error, for downcasting to a transport-specific type.
    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.0
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        TransportError::new(err)
    }
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::new(err)
    }
}

/// Failures returned by `RequestResult` accessors.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The transport failed; passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// No response metadata was ever recorded.
    #[error("no response received")]
    NoResponse,

    /// Response metadata exists but is not an HTTP response.
    #[error("response is not an HTTP response")]
    NotHttpResponse,

    /// The status code is outside `200..300`.
    #[error("bad HTTP status {code}{}", body_suffix(.body))]
    BadHttpStatus { code: u16, body: Option<String> },

    /// The status is successful but the response has no body.
    #[error("response has no data")]
    NoData,

    #[error("response body is not valid UTF-8")]
    NotUtf8,

    /// The body parsed as JSON but is not an object.
    #[error("response body is not a JSON object")]
    NotJsonObject,

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(": {body}"),
        None => String::new(),
    }
}

//! The outcome of one request, with typed accessors.
//!
//! # Design
//! A `RequestResult` is written once, either from a completed transport call
//! or when a cassette is taken off the queue, and never changes afterwards.
//! Each accessor re-derives its answer from the stored fields; nothing is
//! cached.
//!
//! Classification order is fixed: transport error, missing metadata,
//! non-HTTP metadata, status outside `200..300`, missing body, and only then
//! format checks (UTF-8, JSON).

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{RequestError, TransportError};
use crate::http::{HttpRequest, HttpResponseHead, ResponseMeta};

/// Immutable capture of a completed request.
#[derive(Debug, Clone)]
pub struct RequestResult {
    data: Option<Vec<u8>>,
    response: Option<ResponseMeta>,
    error: Option<TransportError>,
    request: Option<HttpRequest>,
}

impl RequestResult {
    pub fn new(
        data: Option<Vec<u8>>,
        response: Option<ResponseMeta>,
        error: Option<TransportError>,
    ) -> Self {
        Self {
            data,
            response,
            error,
            request: None,
        }
    }

    /// A successful 200 response whose body is the UTF-8 bytes of `content`.
    pub fn from_string(content: impl Into<String>) -> Self {
        Self::with_status(200, Some(content.into().into_bytes()))
    }

    /// An HTTP response with the given status and optional body.
    pub fn with_status(status: u16, body: Option<Vec<u8>>) -> Self {
        Self::new(body, Some(HttpResponseHead::new(status).into()), None)
    }

    /// A result that only carries a transport failure.
    pub fn failed(error: TransportError) -> Self {
        Self::new(None, None, Some(error))
    }

    /// Attach the request this result answers.
    pub fn with_request(mut self, request: HttpRequest) -> Self {
        self.request = Some(request);
        self
    }

    pub fn request(&self) -> Option<&HttpRequest> {
        self.request.as_ref()
    }

    pub fn response(&self) -> Option<&ResponseMeta> {
        self.response.as_ref()
    }

    /// HTTP status code, if the response is an HTTP response.
    pub fn status(&self) -> Option<u16> {
        self.http_head().map(|head| head.status)
    }

    pub fn transport_error(&self) -> Option<&TransportError> {
        self.error.as_ref()
    }

    /// Body bytes as received, without any classification.
    pub fn raw_data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// The response body, or the first failure in classification order.
    pub fn data(&self) -> Result<&[u8], RequestError> {
        if let Some(err) = &self.error {
            return Err(RequestError::Transport(err.clone()));
        }
        let response = self.response.as_ref().ok_or(RequestError::NoResponse)?;
        let head = response.as_http().ok_or(RequestError::NotHttpResponse)?;
        if !(200..300).contains(&head.status) {
            // Diagnostic only: an undecodable body is dropped, not reported.
            let body = self
                .data
                .as_deref()
                .and_then(|bytes| std::str::from_utf8(bytes).ok())
                .map(str::to_string);
            return Err(RequestError::BadHttpStatus {
                code: head.status,
                body,
            });
        }
        self.data.as_deref().ok_or(RequestError::NoData)
    }

    /// The response body decoded as UTF-8.
    pub fn string(&self) -> Result<String, RequestError> {
        let bytes = self.data()?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| RequestError::NotUtf8)
    }

    /// The response body parsed as a JSON object.
    pub fn json_object(&self) -> Result<Map<String, Value>, RequestError> {
        let bytes = self.data()?;
        match serde_json::from_slice(bytes)? {
            Value::Object(map) => Ok(map),
            _ => Err(RequestError::NotJsonObject),
        }
    }

    /// The response body deserialized into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        let bytes = self.data()?;
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Whether this is an HTTP response with exactly `code` and body text `body`.
    ///
    /// Never fails: a transport error, missing or non-HTTP metadata, or a body
    /// that is not UTF-8 all yield `false`. The body comparison is exact.
    pub fn is_particular_error(&self, code: u16, body: &str) -> bool {
        if self.error.is_some() {
            return false;
        }
        let Some(head) = self.http_head() else {
            return false;
        };
        if head.status != code {
            return false;
        }
        self.data
            .as_deref()
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .is_some_and(|text| text == body)
    }

    fn http_head(&self) -> Option<&HttpResponseHead> {
        self.response.as_ref().and_then(ResponseMeta::as_http)
    }
}

//! Blocking request/response on top of a callback-based HTTP transport.
//!
//! # Overview
//! `synchronous_request` (or `SyncClient::request`) issues one request through
//! an asynchronous `Transport` and blocks until the completion callback has
//! fired, returning an immutable `RequestResult`. Queued cassettes short-circuit
//! the transport so tests can replay canned responses deterministically.
//!
//! # Design
//! - `RequestResult` stores what the transport reported and classifies it on
//!   demand into `RequestError`; accessors never mutate the result.
//! - `CassetteQueue` is owned by the caller and passed in explicitly.
//! - `UreqTransport` is provided for real traffic; anything implementing
//!   `Transport` can be plugged in instead.
//! - The mock-server crate serves fixture routes for end-to-end tests.

pub mod bridge;
pub mod cassette;
pub mod error;
pub mod http;
pub mod result;
pub mod transport;

pub use bridge::{synchronous_request, SyncClient};
pub use cassette::{CassetteQueue, DirLoader, ResourceLoader, CASSETTE_EXTENSION};
pub use error::{RequestError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponseHead, ResponseMeta};
pub use result::RequestResult;
pub use transport::{Completion, Transport, UreqTransport};

//! Blocking wrapper around a `Transport`.
//!
//! # Design
//! `synchronous_request` turns one asynchronous transport call into one
//! returned `RequestResult`. A cassette, if any is queued, is returned instead
//! and the transport is not touched.
//!
//! The gate is a `tokio::sync::oneshot` channel. The completion moves the
//! captured body, metadata and error into the channel, and the caller blocks
//! on `blocking_recv` until they arrive. `send` consuming the sender means the
//! gate can only be signalled once. There is no timeout: a transport that
//! never completes blocks the caller forever.
//!
//! Must not be called from the thread the transport delivers completions on,
//! nor from inside an async runtime (`blocking_recv` panics there).

use tokio::sync::oneshot;

use crate::cassette::CassetteQueue;
use crate::error::TransportError;
use crate::http::{HttpRequest, ResponseMeta};
use crate::result::RequestResult;
use crate::transport::Transport;

type Captured = (Option<Vec<u8>>, Option<ResponseMeta>, Option<TransportError>);

/// Issue `request` and block until its result is available.
pub fn synchronous_request<T>(transport: &T, cassettes: &mut CassetteQueue, request: HttpRequest) -> RequestResult
where
    T: Transport + ?Sized,
{
    if let Some(cassette) = cassettes.pop() {
        log::debug!(
            "request {} {} {} served from cassette ({} left)",
            request.id,
            request.method.as_str(),
            request.url,
            cassettes.len()
        );
        return cassette.with_request(request);
    }

    log::debug!("request {} {} {} issued", request.id, request.method.as_str(), request.url);

    let (tx, rx) = oneshot::channel::<Captured>();
    let id = request.id;
    transport.issue(
        request.clone(),
        Box::new(move |data, response, error| {
            log::trace!("request {id} completed");
            // The receiver only goes away if the caller panicked.
            let _ = tx.send((data, response, error));
        }),
    );

    let (data, response, error) = match rx.blocking_recv() {
        Ok(captured) => captured,
        Err(_) => {
            log::error!("request {id}: transport dropped its completion without calling it");
            (None, None, Some(TransportError::msg("transport dropped the completion handler")))
        }
    };
    RequestResult::new(data, response, error).with_request(request)
}

/// A transport paired with the cassette queue that shadows it.
#[derive(Debug)]
pub struct SyncClient<T> {
    transport: T,
    cassettes: CassetteQueue,
}

impl<T: Transport> SyncClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_cassettes(transport, CassetteQueue::new())
    }

    pub fn with_cassettes(transport: T, cassettes: CassetteQueue) -> Self {
        Self { transport, cassettes }
    }

    /// Issue `request`, serving the oldest queued cassette first if any.
    pub fn request(&mut self, request: HttpRequest) -> RequestResult {
        synchronous_request(&self.transport, &mut self.cassettes, request)
    }

    pub fn cassettes(&self) -> &CassetteQueue {
        &self.cassettes
    }

    pub fn cassettes_mut(&mut self) -> &mut CassetteQueue {
        &mut self.cassettes
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_parts(self) -> (T, CassetteQueue) {
        (self.transport, self.cassettes)
    }
}

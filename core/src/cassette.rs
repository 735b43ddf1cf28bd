//! Pre-recorded results that stand in for network calls.
//!
//! # Design
//! `CassetteQueue` is a plain FIFO owned by the caller and passed to the
//! bridge explicitly. There is no global queue and no locking; whoever holds
//! `&mut CassetteQueue` is the only writer.
//!
//! Cassette files are the literal UTF-8 response body. They are test
//! fixtures, so a fixture that cannot be read or decoded stops the process
//! with a panic instead of returning an error.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::result::RequestResult;

/// File extension used for cassette fixtures.
pub const CASSETTE_EXTENSION: &str = "cassette";

/// Source of cassette fixture bytes.
pub trait ResourceLoader {
    fn load_bytes(&self, identifier: &str) -> std::io::Result<Vec<u8>>;
}

/// Loads `<root>/<identifier>.cassette` from the filesystem.
#[derive(Debug, Clone)]
pub struct DirLoader {
    root: PathBuf,
}

impl DirLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, identifier: &str) -> PathBuf {
        self.root.join(format!("{identifier}.{CASSETTE_EXTENSION}"))
    }
}

impl ResourceLoader for DirLoader {
    fn load_bytes(&self, identifier: &str) -> std::io::Result<Vec<u8>> {
        std::fs::read(self.path_for(identifier))
    }
}

/// FIFO of results served instead of issuing transport calls.
#[derive(Debug, Default)]
pub struct CassetteQueue {
    entries: VecDeque<RequestResult>,
}

impl CassetteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pre-built result.
    pub fn add(&mut self, result: RequestResult) {
        self.entries.push_back(result);
        log::trace!("cassette queued ({} pending)", self.entries.len());
    }

    /// Append a 200 response whose body is `content`.
    pub fn add_string(&mut self, content: impl Into<String>) {
        self.add(RequestResult::from_string(content));
    }

    /// Append the fixture `identifier` fetched through `loader`.
    ///
    /// # Panics
    /// If the fixture cannot be loaded or is not valid UTF-8.
    pub fn add_resource<L>(&mut self, identifier: &str, loader: &L)
    where
        L: ResourceLoader + ?Sized,
    {
        let bytes = match loader.load_bytes(identifier) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::error!("cassette fixture {identifier:?} could not be loaded: {err}");
                panic!("cassette fixture {identifier:?} could not be loaded: {err}");
            }
        };
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(err) => {
                log::error!("cassette fixture {identifier:?} is not UTF-8: {err}");
                panic!("cassette fixture {identifier:?} is not UTF-8: {err}");
            }
        };
        self.add_string(content);
    }

    /// Remove and return the oldest cassette.
    pub fn pop(&mut self) -> Option<RequestResult> {
        self.entries.pop_front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every pending cassette.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Extend<RequestResult> for CassetteQueue {
    fn extend<I: IntoIterator<Item = RequestResult>>(&mut self, iter: I) {
        for result in iter {
            self.add(result);
        }
    }
}

impl FromIterator<RequestResult> for CassetteQueue {
    fn from_iter<I: IntoIterator<Item = RequestResult>>(iter: I) -> Self {
        let mut queue = CassetteQueue::new();
        queue.extend(iter);
        queue
    }
}

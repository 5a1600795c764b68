//! Shared test harness: a scripted child source with manual release gates.
//!
//! Lets scenario tests decide exactly when each fetch settles and in which
//! order, while still exercising the real worker threads and outcome
//! channel.

#![allow(dead_code)] // each test binary uses a different subset

use lazytree::model::{FileKind, FsItem, LoadError, NodeId};
use lazytree::source::ChildSource;
use std::collections::{HashMap, VecDeque};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Build a folder item.
pub fn folder(id: &str, name: &str) -> FsItem {
    FsItem::Folder {
        id: NodeId::new(id).unwrap(),
        name: name.to_string(),
    }
}

/// Build a small text file item.
pub fn file(id: &str, name: &str) -> FsItem {
    FsItem::File {
        id: NodeId::new(id).unwrap(),
        name: name.to_string(),
        kind: FileKind::Txt,
        size_bytes: 1024,
    }
}

/// Handle that releases one gated fetch.
pub struct Gate {
    tx: Sender<()>,
}

impl Gate {
    /// Let the gated fetch proceed to its scripted response.
    pub fn open(self) {
        // A worker that already gave up (test ended) is fine to ignore.
        let _ = self.tx.send(());
    }
}

/// A child source whose every response is scripted by the test.
///
/// Responses are consumed per id in FIFO order; a fetch for an unscripted
/// id panics (a test bug). An optional gate per call blocks the worker until
/// the test opens it, giving the test full control over completion order.
pub struct ScriptedSource {
    responses: Mutex<HashMap<String, VecDeque<Result<Vec<FsItem>, LoadError>>>>,
    gates: Mutex<HashMap<String, VecDeque<Receiver<()>>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    /// Empty script.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue the next response for `id`.
    pub fn push_ok(&self, id: &str, children: Vec<FsItem>) {
        self.push(id, Ok(children));
    }

    /// Queue the next response for `id` as a failure.
    pub fn push_err(&self, id: &str, message: &str) {
        self.push(id, Err(LoadError::new(message)));
    }

    fn push(&self, id: &str, response: Result<Vec<FsItem>, LoadError>) {
        self.responses
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_default()
            .push_back(response);
    }

    /// Gate the next fetch for `id`: the worker blocks until the returned
    /// [`Gate`] is opened.
    pub fn gate(&self, id: &str) -> Gate {
        let (tx, rx) = mpsc::channel();
        self.gates
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_default()
            .push_back(rx);
        Gate { tx }
    }

    /// How many fetches were issued for `id`.
    pub fn calls_for(&self, id: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.as_str() == id).count()
    }

    /// Total fetches issued across all ids.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ChildSource<FsItem> for ScriptedSource {
    fn fetch_children(&self, parent: &NodeId) -> Result<Vec<FsItem>, LoadError> {
        self.calls.lock().unwrap().push(parent.as_str().to_string());

        let gate = self
            .gates
            .lock()
            .unwrap()
            .get_mut(parent.as_str())
            .and_then(VecDeque::pop_front);
        if let Some(rx) = gate {
            let _ = rx.recv();
        }

        self.responses
            .lock()
            .unwrap()
            .get_mut(parent.as_str())
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| panic!("unscripted fetch for {parent}"))
    }
}

/// Poll `check` until it returns true or the timeout expires.
///
/// Worker threads settle asynchronously; tests use this instead of fixed
/// sleeps.
pub fn wait_until(mut check: impl FnMut() -> bool, what: &str) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if check() {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("timed out waiting for {what}");
}

//! In-memory sinks

use super::{Sink, SinkProvider};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::rc::Rc;

/// Lifecycle step recorded by [`MemorySinks`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    /// Output opened (empty)
    Created(String),
    /// Output closed
    Closed(String),
    /// Output removed
    Deleted(String),
}

#[derive(Debug, Default)]
struct Store {
    files: BTreeMap<String, Vec<u8>>,
    events: Vec<SinkEvent>,
}

/// Keeps outputs in memory, keyed by name.
///
/// Clones share the same store, so a test can hand one clone to the
/// splitter and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemorySinks {
    store: Rc<RefCell<Store>>,
}

impl MemorySinks {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of `name`, if it exists
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.store.borrow().files.get(name).cloned()
    }

    /// Names currently present, sorted
    pub fn names(&self) -> Vec<String> {
        self.store.borrow().files.keys().cloned().collect()
    }

    /// All outputs as `(name, contents)`, sorted by name
    pub fn files(&self) -> Vec<(String, Vec<u8>)> {
        self.store
            .borrow()
            .files
            .iter()
            .map(|(name, data)| (name.clone(), data.clone()))
            .collect()
    }

    /// Every lifecycle event so far, in order
    pub fn events(&self) -> Vec<SinkEvent> {
        self.store.borrow().events.clone()
    }

    /// Number of outputs currently present
    pub fn len(&self) -> usize {
        self.store.borrow().files.len()
    }

    /// True when no outputs are present
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle to one in-memory output
#[derive(Debug)]
pub struct MemorySink {
    name: String,
    store: Rc<RefCell<Store>>,
}

impl Sink for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        let mut store = self.store.borrow_mut();
        match store.files.get_mut(&self.name) {
            Some(data) => {
                data.extend_from_slice(buf);
                Ok(())
            }
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} was deleted while open", self.name),
            )),
        }
    }

    fn close(self) -> io::Result<()> {
        self.store
            .borrow_mut()
            .events
            .push(SinkEvent::Closed(self.name));
        Ok(())
    }
}

impl SinkProvider for MemorySinks {
    type Sink = MemorySink;

    fn create(&mut self, name: &str) -> io::Result<MemorySink> {
        let mut store = self.store.borrow_mut();
        store.files.insert(name.to_string(), Vec::new());
        store.events.push(SinkEvent::Created(name.to_string()));

        Ok(MemorySink {
            name: name.to_string(),
            store: Rc::clone(&self.store),
        })
    }

    fn delete(&mut self, name: &str) -> io::Result<()> {
        let mut store = self.store.borrow_mut();
        if store.files.remove(name).is_some() {
            store.events.push(SinkEvent::Deleted(name.to_string()));
        }
        Ok(())
    }
}

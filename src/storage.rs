//! Key/value persistence bridge.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::BridgeError;
use crate::message::Response;
use crate::port::ResponsePort;

/// A string key/value store, such as the browser's `localStorage`.
///
/// The store may be shared with other code in the same storage scope;
/// implementations add no isolation of their own.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, BridgeError>;
    fn set(&self, key: &str, value: &str) -> Result<(), BridgeError>;
    /// Removing a key that is not present succeeds.
    fn remove(&self, key: &str) -> Result<(), BridgeError>;
}

/// In-memory store. Used when the browser refuses `localStorage`, and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, BridgeError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BridgeError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BridgeError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Handles the `LocalStorage*` requests.
///
/// Failures from the store are logged, never surfaced. `get` always
/// answers exactly once, reporting an absent value if the read failed.
pub struct StorageBridge {
    store: Rc<dyn KeyValueStore>,
    responses: ResponsePort,
}

impl StorageBridge {
    pub fn new(store: Rc<dyn KeyValueStore>, responses: ResponsePort) -> Self {
        Self { store, responses }
    }

    pub fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!(key, error = %e, "storage write failed");
        }
    }

    pub fn get(&self, key: &str) {
        let value = self.store.get(key).unwrap_or_else(|e| {
            warn!(key, error = %e, "storage read failed");
            None
        });
        debug!(key, found = value.is_some(), "storage get");
        self.responses.send(Response::StorageGetResult {
            key: key.to_string(),
            value,
        });
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            warn!(key, error = %e, "storage remove failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bridge() -> (Rc<MemoryStore>, StorageBridge, Rc<RefCell<Vec<Response>>>) {
        let store = Rc::new(MemoryStore::new());
        let port = ResponsePort::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        port.subscribe(move |r| sink.borrow_mut().push(r));
        (store.clone(), StorageBridge::new(store, port), seen)
    }

    fn answer(key: &str, value: Option<&str>) -> Response {
        Response::StorageGetResult {
            key: key.to_string(),
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn test_set_then_get() {
        let (_, bridge, seen) = bridge();
        bridge.set("theme", "dark");
        bridge.get("theme");
        assert_eq!(*seen.borrow(), vec![answer("theme", Some("dark"))]);
    }

    #[test]
    fn test_get_missing_key() {
        let (store, bridge, seen) = bridge();
        assert!(store.is_empty());
        bridge.get("missing");
        assert_eq!(*seen.borrow(), vec![answer("missing", None)]);
    }

    #[test]
    fn test_set_overwrites() {
        let (store, bridge, seen) = bridge();
        bridge.set("k", "one");
        bridge.set("k", "two");
        bridge.get("k");
        assert_eq!(store.len(), 1);
        assert_eq!(*seen.borrow(), vec![answer("k", Some("two"))]);
    }

    #[test]
    fn test_remove_then_get() {
        let (_, bridge, seen) = bridge();
        bridge.set("k", "v");
        bridge.remove("k");
        bridge.remove("never-set");
        bridge.get("k");
        bridge.get("never-set");
        assert_eq!(
            *seen.borrow(),
            vec![answer("k", None), answer("never-set", None)]
        );
    }

    #[test]
    fn test_empty_string_is_not_absent() {
        let (_, bridge, seen) = bridge();
        bridge.set("blank", "");
        bridge.get("blank");
        assert_eq!(*seen.borrow(), vec![answer("blank", Some(""))]);
    }

    #[test]
    fn test_set_and_remove_send_nothing() {
        let (_, bridge, seen) = bridge();
        bridge.set("k", "v");
        bridge.remove("k");
        assert!(seen.borrow().is_empty());
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _: &str) -> Result<Option<String>, BridgeError> {
            Err(BridgeError::StorageUnavailable)
        }

        fn set(&self, _: &str, _: &str) -> Result<(), BridgeError> {
            Err(BridgeError::Js("QuotaExceededError".into()))
        }

        fn remove(&self, _: &str) -> Result<(), BridgeError> {
            Err(BridgeError::StorageUnavailable)
        }
    }

    #[test]
    fn test_failed_read_still_answers_once() {
        let port = ResponsePort::new();
        let bridge = StorageBridge::new(Rc::new(BrokenStore), port.clone());
        bridge.set("k", "v");
        bridge.remove("k");
        bridge.get("k");
        assert_eq!(port.pending(), 1);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        port.subscribe(move |r| sink.borrow_mut().push(r));
        assert_eq!(*seen.borrow(), vec![answer("k", None)]);
    }
}

//! The shared state store: a process-wide observable key/value map.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

type WatchFn = Box<dyn Fn(&Value) + Send + Sync>;

struct WatcherEntry {
    id: u64,
    key: String,
    handler: WatchFn,
    active: AtomicBool,
}

struct StoreInner {
    values: Mutex<HashMap<String, Value>>,
    watchers: Mutex<Vec<Arc<WatcherEntry>>>,
    next_id: AtomicU64,
}

/// A small process-wide key/value store with per-key watchers.
///
/// Keys are opaque strings, values arbitrary JSON. Writes are
/// last-write-wins with no versioning or merge. Watchers are notified
/// synchronously, and only ever with *defined* values: clearing a key emits
/// nothing. That skip-on-undefined behavior is a deliberate, preserved
/// contract — watchers observing `set("k", 5)`, `clear("k")`, `set("k", 7)`
/// see exactly `5` then `7`.
///
/// The store never fails; reading a missing key yields `None`. Cloning
/// shares the store.
#[derive(Clone)]
pub struct StateStore {
    inner: Arc<StoreInner>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                values: Mutex::new(HashMap::new()),
                watchers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Replaces the value under `key` and synchronously notifies all active
    /// watchers of that key.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        self.inner.values.lock().unwrap().insert(key.clone(), value.clone());

        let snapshot: Vec<Arc<WatcherEntry>> = {
            let watchers = self.inner.watchers.lock().unwrap();
            watchers.iter().filter(|w| w.key == key).cloned().collect()
        };
        for watcher in snapshot {
            if watcher.active.load(Ordering::Acquire) {
                (watcher.handler)(&value);
            }
        }
    }

    /// Removes the value under `key`. Watchers are *not* notified; they only
    /// ever observe defined values.
    pub fn clear(&self, key: &str) {
        self.inner.values.lock().unwrap().remove(key);
    }

    /// Returns the current value under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.values.lock().unwrap().get(key).cloned()
    }

    /// Watches a key. The handler fires immediately with the current value
    /// if one is defined, then on every subsequent `set` of that key.
    pub fn watch<F>(&self, key: impl Into<String>, handler: F) -> WatchHandle
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        let key = key.into();
        let entry = Arc::new(WatcherEntry {
            id: self.inner.next_id.fetch_add(1, Ordering::Relaxed),
            key: key.clone(),
            handler: Box::new(handler),
            active: AtomicBool::new(true),
        });
        self.inner.watchers.lock().unwrap().push(Arc::clone(&entry));

        // Initial emission outside the watcher lock; handlers may touch the
        // store reentrantly.
        let current = self.get(&key);
        if let Some(value) = current {
            (entry.handler)(&value);
        }

        WatchHandle {
            entry,
            store: Arc::downgrade(&self.inner),
        }
    }
}

/// Handle to an active watch.
pub struct WatchHandle {
    entry: Arc<WatcherEntry>,
    store: std::sync::Weak<StoreInner>,
}

impl WatchHandle {
    /// Stops notifications; guaranteed before this call returns.
    pub fn unwatch(&self) {
        self.entry.active.store(false, Ordering::Release);
        if let Some(inner) = self.store.upgrade() {
            inner
                .watchers
                .lock()
                .unwrap()
                .retain(|w| w.id != self.entry.id);
        }
    }
}

//! # Snapshot surface for persistence collaborators.
//!
//! The core never performs I/O. A persistence layer (disk, database, browser
//! storage behind FFI) implements [`SnapshotStore`] and decides **when** to
//! read and write; the unit only exposes its current state as a serialized
//! value via [`Unit::snapshot`](crate::Unit::snapshot), and [`seed`] turns a
//! stored snapshot back into an initial state for construction.
//!
//! ## Wiring
//! ```text
//! startup:    store.read(key) ──► seed(...) ──► Unit::new(name, state)
//! per change: unit.snapshot() ──► store.write(key, snapshot)
//! ```
//!
//! ## Example
//! ```rust
//! use statevisor::{seed, MemoryStore, SnapshotStore};
//!
//! let store = MemoryStore::default();
//! store.write("counter", "41").unwrap();
//!
//! let initial: i64 = seed(&store, "counter", 0);
//! assert_eq!(initial, 41);
//!
//! let missing: i64 = seed(&store, "absent", 7);
//! assert_eq!(missing, 7);
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PersistError;

/// Key-value store for serialized state snapshots.
///
/// Implementations own the I/O (and its failure modes); the core only hands
/// them opaque strings.
pub trait SnapshotStore: Send + Sync {
    /// Reads the snapshot stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Writes `snapshot` under `key`, replacing any previous value.
    fn write(&self, key: &str, snapshot: &str) -> Result<(), PersistError>;
}

/// In-memory [`SnapshotStore`] for tests and embedded use.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self
            .entries
            .lock()
            .expect("memory store poisoned")
            .get(key)
            .cloned())
    }

    fn write(&self, key: &str, snapshot: &str) -> Result<(), PersistError> {
        self.entries
            .lock()
            .expect("memory store poisoned")
            .insert(key.to_string(), snapshot.to_string());
        Ok(())
    }
}

/// Hydrates an initial state from `store`, falling back to `fallback` when
/// the key is absent, the store fails, or the snapshot does not parse.
///
/// Corrupt snapshots are logged and discarded rather than propagated: a unit
/// must always be constructible.
pub fn seed<S: DeserializeOwned>(store: &dyn SnapshotStore, key: &str, fallback: S) -> S {
    match store.read(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                log::warn!(
                    target: "statevisor",
                    "discarding corrupt snapshot for key={key}: {err}"
                );
                fallback
            }
        },
        Ok(None) => fallback,
        Err(err) => {
            log::warn!(target: "statevisor", "snapshot read failed for key={key}: {err}");
            fallback
        }
    }
}

/// Serializes `state` and writes it under `key`.
pub fn persist<S: Serialize>(
    store: &dyn SnapshotStore,
    key: &str,
    state: &S,
) -> Result<(), PersistError> {
    let snapshot = serde_json::to_string(state)?;
    store.write(key, &snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TodoState {
        items: Vec<String>,
        done: u32,
    }

    #[test]
    fn roundtrip_through_memory_store() {
        let store = MemoryStore::new();
        let state = TodoState {
            items: vec!["write tests".to_string()],
            done: 1,
        };

        persist(&store, "todos", &state).unwrap();
        let restored: TodoState = seed(
            &store,
            "todos",
            TodoState {
                items: Vec::new(),
                done: 0,
            },
        );
        assert_eq!(restored, state);
    }

    #[test]
    fn seed_falls_back_on_absent_key() {
        let store = MemoryStore::new();
        let state: u32 = seed(&store, "nothing", 9);
        assert_eq!(state, 9);
    }

    #[test]
    fn seed_falls_back_on_corrupt_snapshot() {
        let store = MemoryStore::new();
        store.write("broken", "{not json").unwrap();
        let state: u32 = seed(&store, "broken", 3);
        assert_eq!(state, 3);
    }

    #[test]
    fn write_replaces_previous_snapshot() {
        let store = MemoryStore::new();
        store.write("k", "1").unwrap();
        store.write("k", "2").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("2"));
    }
}

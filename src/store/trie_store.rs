//! Thread-safe store publishing trie versions
//!
//! Two locks with separate jobs:
//! - `write_lock` serializes writers across a whole read-build-publish cycle
//! - `current` guards the published version and is held only for a handle
//!   copy (readers) or a handle swap (writers)
//!
//! New versions are built outside `current`, so readers never wait on a
//! writer building a version and never see one that is half built.

use super::config::StoreConfig;
use super::guard::ValueGuard;
use crate::trie::Trie;
use parking_lot::Mutex;
use std::any::Any;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// The published state of a store
struct Published {
    /// Number of publishes so far
    version: u64,
    /// The current version
    trie: Trie,
    /// Recently published versions, newest first
    history: VecDeque<(u64, Trie)>,
}

/// A concurrent key-value store over persistent trie versions
///
/// Any number of threads may read while one thread at a time writes.
/// Reads work on a snapshot of the version current when they started.
pub struct TrieStore {
    config: StoreConfig,
    current: Mutex<Published>,
    write_lock: Mutex<()>,
}

impl TrieStore {
    /// Create an empty store with the default config
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store with the given config
    pub fn with_config(config: StoreConfig) -> Self {
        let mut history = VecDeque::with_capacity(config.retained_versions);
        if config.retained_versions > 0 {
            history.push_front((0, Trie::new()));
        }

        TrieStore {
            config,
            current: Mutex::new(Published {
                version: 0,
                trie: Trie::new(),
                history,
            }),
            write_lock: Mutex::new(()),
        }
    }

    /// The config this store was created with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get the value at `key` if it holds a `T`
    ///
    /// The returned guard keeps the version it was read from alive.
    pub fn get<T: Any + Send + Sync>(&self, key: impl AsRef<[u8]>) -> Option<ValueGuard<T>> {
        let snapshot = self.snapshot();
        let value = snapshot.get_shared::<T>(key.as_ref());
        trace!(
            target: "cowtrie::store",
            store = %self.config.name,
            hit = value.is_some(),
            "store_get"
        );
        Some(ValueGuard::new(snapshot, value?))
    }

    /// Store `value` at `key` and publish the new version
    pub fn put<T: Any + Send + Sync>(&self, key: impl AsRef<[u8]>, value: T) {
        let _writer = self.write_lock.lock();
        let next = self.snapshot().put(key, value);
        self.publish(next, "put");
    }

    /// Remove the value at `key` and publish the new version
    pub fn remove(&self, key: impl AsRef<[u8]>) {
        let _writer = self.write_lock.lock();
        let next = self.snapshot().remove(key);
        self.publish(next, "remove");
    }

    /// Copy the handle to the current version
    pub fn snapshot(&self) -> Trie {
        self.current.lock().trie.clone()
    }

    /// Number of versions published since the store was created
    pub fn version(&self) -> u64 {
        self.current.lock().version
    }

    /// Retained versions, newest first
    pub fn history(&self) -> Vec<(u64, Trie)> {
        self.current.lock().history.iter().cloned().collect()
    }

    /// Get a retained version by number
    pub fn checkout(&self, version: u64) -> Option<Trie> {
        let current = self.current.lock();
        if version == current.version {
            return Some(current.trie.clone());
        }
        current
            .history
            .iter()
            .find(|(v, _)| *v == version)
            .map(|(_, trie)| trie.clone())
    }

    // === Internal helpers ===

    /// Swap in a fully built version. Callers hold `write_lock`.
    fn publish(&self, trie: Trie, op: &'static str) {
        let retained = self.config.retained_versions;
        let mut evicted = Vec::new();

        let mut current = self.current.lock();
        current.version += 1;
        let version = current.version;
        if retained > 0 {
            current.history.push_front((version, trie.clone()));
            while current.history.len() > retained {
                evicted.extend(current.history.pop_back());
            }
        }
        let previous = std::mem::replace(&mut current.trie, trie);
        drop(current);

        debug!(
            target: "cowtrie::store",
            store = %self.config.name,
            version,
            op,
            "store_publish"
        );
        for (old, _) in &evicted {
            debug!(
                target: "cowtrie::store",
                store = %self.config.name,
                version = *old,
                "store_history_evict"
            );
        }

        // Old versions may be freed here; do it outside the publish lock
        drop(previous);
        drop(evicted);
    }
}

impl Default for TrieStore {
    fn default() -> Self {
        Self::new()
    }
}

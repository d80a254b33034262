//! Value guards that pin a snapshot

use crate::trie::Trie;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A value read from a [`TrieStore`](super::TrieStore)
///
/// The guard retains the whole snapshot the value was read from, so the
/// value and every node on its path stay alive for as long as the guard
/// does, no matter how many versions the store publishes in the meantime.
pub struct ValueGuard<T> {
    snapshot: Trie,
    value: Arc<T>,
}

impl<T> ValueGuard<T> {
    pub(crate) fn new(snapshot: Trie, value: Arc<T>) -> Self {
        ValueGuard { snapshot, value }
    }

    /// Borrow the guarded value
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The version the value was read from
    pub fn snapshot(&self) -> &Trie {
        &self.snapshot
    }
}

impl<T> Deref for ValueGuard<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> Clone for ValueGuard<T> {
    fn clone(&self) -> Self {
        ValueGuard {
            snapshot: self.snapshot.clone(),
            value: Arc::clone(&self.value),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueGuard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValueGuard").field(&*self.value).finish()
    }
}

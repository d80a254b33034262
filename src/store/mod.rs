//! Concurrent snapshot store
//!
//! A [`TrieStore`] owns the current [`Trie`](crate::Trie) version. Readers
//! take a snapshot and never block writers for longer than a handle copy;
//! writers are serialized and publish fully built versions only.

mod config;
mod guard;
mod trie_store;

pub use config::StoreConfig;
pub use guard::ValueGuard;
pub use trie_store::TrieStore;

//! # cowtrie
//!
//! A persistent, copy-on-write trie and a thread-safe snapshot store.
//!
//! Every write produces a new [`Trie`] version that shares all untouched
//! subtrees with the version it was derived from. Old versions stay valid
//! for as long as someone holds them.
//!
//! ## Core Concepts
//!
//! - **Nodes**: Immutable once published, shared across versions via `Arc`
//! - **Tries**: Immutable handles to a root node; `put`/`remove` return new tries
//! - **Store**: Holds the current version, serializes writers, publishes atomically
//! - **Guards**: Keep a snapshot alive while a value read from it is in use
//!
//! ## Example
//!
//! ```
//! use cowtrie::{Trie, TrieStore};
//!
//! let v1 = Trie::new().put("app", 1u32).put("apple", 2u32);
//! let v2 = v1.remove("app");
//! assert_eq!(v1.get::<u32>("app"), Some(&1));
//! assert_eq!(v2.get::<u32>("app"), None);
//! assert_eq!(v2.get::<u32>("apple"), Some(&2));
//!
//! let store = TrieStore::new();
//! store.put("answer", 42u64);
//! let guard = store.get::<u64>("answer").unwrap();
//! assert_eq!(*guard, 42);
//! ```

pub mod store;
pub mod trie;

mod error;

pub use error::{Error, Result};
pub use store::{StoreConfig, TrieStore, ValueGuard};
pub use trie::{Trie, TrieNode};

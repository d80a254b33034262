//! Copy-on-write trie with structural sharing
//!
//! This implements a persistent trie where:
//! - Each key byte selects one child edge
//! - A write rebuilds only the root-to-key path; every other node is shared
//! - Old versions remain readable for as long as a handle to them is held

mod node;
mod tree;

pub use node::TrieNode;
pub use tree::Trie;

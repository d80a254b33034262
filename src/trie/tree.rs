//! Persistent trie versions

use super::node::SharedValue;
use super::TrieNode;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An immutable version of the trie
///
/// `put` and `remove` never modify the receiver. They rebuild only the
/// nodes on the path from the root to the key and return a new `Trie`
/// that shares every other node with this one. Cloning a `Trie` is a
/// single reference count bump.
#[derive(Clone, Default)]
pub struct Trie {
    root: Option<Arc<TrieNode>>,
}

impl Trie {
    /// Create an empty trie
    pub fn new() -> Self {
        Trie { root: None }
    }

    fn from_root(root: TrieNode) -> Self {
        Trie {
            root: Some(Arc::new(root)),
        }
    }

    /// Get the root node, `None` for an empty trie
    pub fn root(&self) -> Option<&Arc<TrieNode>> {
        self.root.as_ref()
    }

    /// Check if this trie holds no nodes at all
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Get the value stored at `key` if it is a `T`
    ///
    /// The empty key refers to the root. A key that is absent, or that
    /// holds a value of another type, yields `None`.
    pub fn get<T: Any>(&self, key: impl AsRef<[u8]>) -> Option<&T> {
        self.find(key.as_ref())?.value::<T>()
    }

    /// Get a shared handle to the value stored at `key` if it is a `T`
    pub(crate) fn get_shared<T: Any + Send + Sync>(&self, key: &[u8]) -> Option<Arc<T>> {
        let value = self.find(key)?.value.clone()?;
        value.downcast::<T>().ok()
    }

    /// Check if `key` holds a value of any type
    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.find(key.as_ref())
            .is_some_and(|node| node.is_value_node())
    }

    /// Return a new trie with `value` stored at `key`
    ///
    /// Overwriting a key replaces only its value; anything stored below
    /// the key is kept.
    pub fn put<T: Any + Send + Sync>(&self, key: impl AsRef<[u8]>, value: T) -> Trie {
        let key = key.as_ref();
        let value: SharedValue = Arc::new(value);

        // Shallow copies of the nodes above the key; path[i] is the parent of key[i]
        let mut path: Vec<TrieNode> = Vec::with_capacity(key.len());
        let mut existing = self.root.as_deref();
        for symbol in key {
            path.push(existing.cloned().unwrap_or_default());
            existing = existing.and_then(|n| n.child(*symbol)).map(Arc::as_ref);
        }

        // Keep whatever already hangs below the key
        let children = existing.map(|n| n.children.clone()).unwrap_or_default();
        let mut node = TrieNode::with_value(children, value);
        for (mut parent, symbol) in path.into_iter().rev().zip(key.iter().rev()) {
            parent.children.insert(*symbol, Arc::new(node));
            node = parent;
        }
        Trie::from_root(node)
    }

    /// Return a new trie without the value at `key`
    ///
    /// Nodes left with neither a value nor children are pruned bottom-up.
    /// Removing a key that holds no value returns a trie sharing this
    /// trie's root.
    pub fn remove(&self, key: impl AsRef<[u8]>) -> Trie {
        let key = key.as_ref();
        let Some(root) = self.root.as_deref() else {
            return Trie::new();
        };

        let mut ancestors: Vec<&TrieNode> = Vec::with_capacity(key.len());
        let mut node = root;
        for symbol in key {
            let Some(child) = node.child(*symbol).map(Arc::as_ref) else {
                return self.clone();
            };
            ancestors.push(node);
            node = child;
        }
        if !node.is_value_node() {
            return self.clone();
        }

        // Rebuilt copy of the current subtree, `None` once it has been pruned
        let mut replacement = node
            .has_children()
            .then(|| TrieNode::plain(node.children.clone()));
        for (parent, symbol) in ancestors.into_iter().rev().zip(key.iter().rev()) {
            let mut new_parent = parent.clone();
            match replacement {
                Some(child) => {
                    new_parent.children.insert(*symbol, Arc::new(child));
                }
                None => {
                    new_parent.children.remove(symbol);
                }
            }
            // Stop at the first ancestor that still holds a value or other branches
            replacement = (!new_parent.is_prunable()).then_some(new_parent);
        }

        match replacement {
            Some(root) => Trie::from_root(root),
            None => Trie::new(),
        }
    }

    /// Count the nodes reachable from the root
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&TrieNode> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.values().map(Arc::as_ref));
        }
        count
    }

    // === Internal helpers ===

    fn find(&self, key: &[u8]) -> Option<&TrieNode> {
        let mut node = self.root.as_deref()?;
        for symbol in key {
            node = node.children.get(symbol)?;
        }
        Some(node)
    }
}

impl fmt::Debug for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("nodes", &self.node_count())
            .finish()
    }
}

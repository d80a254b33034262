//! Trie node types

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A type-erased value owned by a value node
pub(crate) type SharedValue = Arc<dyn Any + Send + Sync>;

/// A node in the copy-on-write trie
///
/// A node without a value is a plain node; a node carrying a value is a
/// value node. Children are shared by reference with every other version
/// that reaches them, so a node must never change after it has been linked
/// into a published trie.
///
/// `Clone` is shallow: the clone points at the same children and the same
/// value as the original.
#[derive(Clone, Default)]
pub struct TrieNode {
    /// Children indexed by the next key byte
    pub(crate) children: BTreeMap<u8, Arc<TrieNode>>,
    /// Value stored at this exact key, if any
    pub(crate) value: Option<SharedValue>,
}

impl TrieNode {
    /// Create a plain node with no children
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a plain node that shares the given children
    pub(crate) fn plain(children: BTreeMap<u8, Arc<TrieNode>>) -> Self {
        TrieNode {
            children,
            value: None,
        }
    }

    /// Create a value node that shares the given children
    pub(crate) fn with_value(children: BTreeMap<u8, Arc<TrieNode>>, value: SharedValue) -> Self {
        TrieNode {
            children,
            value: Some(value),
        }
    }

    /// Check if this node carries a value
    pub fn is_value_node(&self) -> bool {
        self.value.is_some()
    }

    /// Check if this node has any children
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Get the child reached by `symbol`
    pub fn child(&self, symbol: u8) -> Option<&Arc<TrieNode>> {
        self.children.get(&symbol)
    }

    /// Iterate over `(symbol, child)` pairs in symbol order
    pub fn children(&self) -> impl Iterator<Item = (u8, &Arc<TrieNode>)> {
        self.children.iter().map(|(symbol, child)| (*symbol, child))
    }

    /// Borrow the value if it is a `T`
    pub fn value<T: Any>(&self) -> Option<&T> {
        self.value.as_deref()?.downcast_ref::<T>()
    }

    /// A node that is neither a value nor a path to one can be pruned
    pub(crate) fn is_prunable(&self) -> bool {
        !self.is_value_node() && !self.has_children()
    }
}

impl Drop for TrieNode {
    fn drop(&mut self) {
        // Unlink children with an explicit stack so long chains do not recurse
        let mut stack: Vec<Arc<TrieNode>> =
            std::mem::take(&mut self.children).into_values().collect();
        while let Some(child) = stack.pop() {
            if let Ok(mut node) = Arc::try_unwrap(child) {
                stack.extend(std::mem::take(&mut node.children).into_values());
            }
        }
    }
}

impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieNode")
            .field("is_value_node", &self.is_value_node())
            .field("children", &self.children.keys().map(|b| *b as char).collect::<String>())
            .finish()
    }
}

//! Ordered child storage for KV nodes.
//!
//! This module provides [`ChildMap`], a wrapper around [`IndexMap`] mapping each
//! child key to its sibling group. Both orders matter to the format:
//!
//! - **Key-group order**: groups iterate in the order their key was first added
//! - **Sibling order**: nodes sharing a key iterate in the order they were added
//!
//! Iterating all children therefore yields every node of the first key, then
//! every node of the second key, and so on.
//!
//! ## Examples
//!
//! ```rust
//! use kvtree::KvDocument;
//!
//! let mut doc = KvDocument::new("root");
//! let root = doc.root_id();
//! doc.add_leaf(root, "x", "1");
//! doc.add_leaf(root, "y", "2");
//! doc.add_leaf(root, "x", "3");
//!
//! let keys: Vec<_> = doc.root().children().map(|c| c.key().to_string()).collect();
//! assert_eq!(keys, vec!["x", "x", "y"]);
//! ```

use crate::NodeId;
use indexmap::IndexMap;
use std::iter::Flatten;

/// Sibling groups of a node, keyed by child key in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildMap {
    groups: IndexMap<String, Vec<NodeId>>,
    count: usize,
}

/// Iterator over every child id of a [`ChildMap`], group by group.
pub type Ids<'a> = Flatten<indexmap::map::Values<'a, String, Vec<NodeId>>>;

impl ChildMap {
    /// Creates an empty `ChildMap`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` to the sibling group of `key`, creating the group if needed.
    pub fn push(&mut self, key: &str, id: NodeId) {
        match self.groups.get_mut(key) {
            Some(group) => group.push(id),
            None => {
                self.groups.insert(key.to_string(), vec![id]);
            }
        }
        self.count += 1;
    }

    /// Returns the first node ever added under `key`.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<NodeId> {
        self.groups.get(key).and_then(|group| group.first().copied())
    }

    /// Returns the whole sibling group of `key`.
    #[must_use]
    pub fn group(&self, key: &str) -> Option<&[NodeId]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Removes the sibling group of `key`, keeping the order of the other groups.
    pub fn remove(&mut self, key: &str) -> Option<Vec<NodeId>> {
        let removed = self.groups.shift_remove(key)?;
        self.count -= removed.len();
        Some(removed)
    }

    /// Returns `true` if a group exists for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.groups.contains_key(key)
    }

    /// Total number of children across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns an iterator over the distinct keys, in first-insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Vec<NodeId>> {
        self.groups.keys()
    }

    /// Returns an iterator over `(key, group)` pairs, in first-insertion order.
    pub fn groups(&self) -> indexmap::map::Iter<'_, String, Vec<NodeId>> {
        self.groups.iter()
    }

    /// Returns an iterator over every child id, group by group.
    pub fn ids(&self) -> Ids<'_> {
        self.groups.values().flatten()
    }
}

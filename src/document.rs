//! The KV document tree.
//!
//! A [`KvDocument`] owns every node of one tree in an arena and hands out
//! [`NodeId`] handles. The parent relation is an id, never a second owner, so
//! a document can be freely moved, cloned and dropped.
//!
//! ## Building a Tree
//!
//! ```rust
//! use kvtree::{to_string, KvDocument};
//!
//! let mut doc = KvDocument::new("root");
//! let root = doc.root_id();
//! let player = doc.add_section(root, "Player");
//! doc.add_leaf(player, "name", "hero");
//! doc.add_leaf(player, "item", "sword");
//! doc.add_leaf(player, "item", "shield");
//!
//! assert_eq!(
//!     to_string(&doc),
//!     "\"Player\"\n{\n\t\"name\"\t\"hero\"\n\t\"item\"\t\"sword\"\n\t\"item\"\t\"shield\"\n}\n"
//! );
//! ```
//!
//! ## Copies
//!
//! [`KvDocument::add_record`] and [`KvDocument::clone_subtree`] always copy:
//! the source subtree stays where it was and the copy shares nothing with it.

use crate::escape::unescape;
use crate::map::ChildMap;
use crate::{NodeId, NodeRef};
use std::collections::VecDeque;
use std::fmt;

/// Callback invoked after a node's scalar value is reassigned.
pub type ValueListener = Box<dyn FnMut(&ValueChange<'_>) + Send>;

/// Describes one value reassignment, as seen by a [`ValueListener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueChange<'a> {
    pub node: NodeId,
    pub key: &'a str,
    /// Previously stored scalar, even if children were hiding it.
    pub old: Option<&'a str>,
    pub new: Option<&'a str>,
}

pub(crate) struct Slot {
    pub(crate) key: String,
    pub(crate) value: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: ChildMap,
    listener: Option<ValueListener>,
}

impl Slot {
    fn new(key: String, value: Option<String>, parent: Option<NodeId>) -> Self {
        Slot {
            key,
            value,
            parent,
            children: ChildMap::new(),
            listener: None,
        }
    }
}

/// A tree of keyed nodes with an implicit root.
///
/// The root is a synthetic wrapper: its key names the document (for parsed
/// files, the file stem) and it is not written out by default.
pub struct KvDocument {
    entries: Vec<Entry>,
    free: Vec<usize>,
    live: usize,
    root: NodeId,
}

/// One arena cell. The generation is bumped every time the cell is freed so
/// ids handed out for an earlier occupant stop resolving.
struct Entry {
    generation: u32,
    slot: Option<Slot>,
}

impl KvDocument {
    /// Creates a document holding only a root node named `root_key`.
    #[must_use]
    pub fn new(root_key: impl Into<String>) -> Self {
        KvDocument {
            entries: vec![Entry {
                generation: 0,
                slot: Some(Slot::new(root_key.into(), None, None)),
            }],
            free: Vec::new(),
            live: 1,
            root: NodeId::new(0, 0),
        }
    }

    #[must_use]
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(self, self.root)
    }

    /// Returns a view of `id`.
    ///
    /// # Panics
    ///
    /// Panics if the node was removed. Use [`KvDocument::get_node`] to check.
    #[must_use]
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        assert!(self.contains(id), "node {} is not part of this document", id.index());
        NodeRef::new(self, id)
    }

    /// Returns a view of `id`, or `None` if the node was removed.
    #[must_use]
    pub fn get_node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.contains(id).then(|| NodeRef::new(self, id))
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.entries
            .get(id.index)
            .is_some_and(|entry| entry.generation == id.generation && entry.slot.is_some())
    }

    /// Number of live nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.live
    }

    pub(crate) fn slot(&self, id: NodeId) -> &Slot {
        match self.entries.get(id.index) {
            Some(Entry {
                generation,
                slot: Some(slot),
            }) if *generation == id.generation => slot,
            _ => panic!("node {} is not part of this document", id.index),
        }
    }

    fn slot_mut(&mut self, id: NodeId) -> &mut Slot {
        match self.entries.get_mut(id.index) {
            Some(Entry {
                generation,
                slot: Some(slot),
            }) if *generation == id.generation => slot,
            _ => panic!("node {} is not part of this document", id.index),
        }
    }

    /// Stores `slot` in a free cell, or a new one when none is free.
    fn allocate(&mut self, slot: Slot) -> NodeId {
        self.live += 1;
        match self.free.pop() {
            Some(index) => {
                let entry = &mut self.entries[index];
                entry.slot = Some(slot);
                NodeId::new(index, entry.generation)
            }
            None => {
                self.entries.push(Entry {
                    generation: 0,
                    slot: Some(slot),
                });
                NodeId::new(self.entries.len() - 1, 0)
            }
        }
    }

    /// Takes the slot of `id` out of the arena and retires the id.
    fn release(&mut self, id: NodeId) -> Option<Slot> {
        let entry = self
            .entries
            .get_mut(id.index)
            .filter(|entry| entry.generation == id.generation)?;
        let slot = entry.slot.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(slot)
    }

    /// Appends a child of `parent` with `key` and an optional scalar value.
    ///
    /// Keys may repeat; the new node joins the end of that key's sibling group.
    pub fn add(
        &mut self,
        parent: NodeId,
        key: impl Into<String>,
        value: Option<String>,
    ) -> NodeId {
        let key = key.into();
        // Checks `parent` before anything is allocated.
        self.slot(parent);
        let id = self.allocate(Slot::new(key.clone(), value, Some(parent)));
        self.slot_mut(parent).children.push(&key, id);
        id
    }

    /// Appends a child without a value, ready to receive children of its own.
    pub fn add_section(&mut self, parent: NodeId, key: impl Into<String>) -> NodeId {
        self.add(parent, key, None)
    }

    /// Appends a child holding `value`.
    pub fn add_leaf(
        &mut self,
        parent: NodeId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> NodeId {
        self.add(parent, key, Some(value.into()))
    }

    /// Deep-copies `record` and its subtree under `parent`, returning the copy.
    ///
    /// `record` may belong to any document; it is left untouched.
    pub fn add_record(&mut self, parent: NodeId, record: NodeRef<'_>) -> NodeId {
        let copy = self.add(parent, record.key(), record.value().map(str::to_string));
        // Breadth-first, so each parent receives its children in order
        // without recursing once per level.
        let mut pending: VecDeque<_> = record.children().map(|child| (child, copy)).collect();
        while let Some((source, parent)) = pending.pop_front() {
            let id = self.add(parent, source.key(), source.value().map(str::to_string));
            pending.extend(source.children().map(|child| (child, id)));
        }
        copy
    }

    /// Deep-copies `source`, a node of this same document, under `parent`.
    pub fn add_copy(&mut self, parent: NodeId, source: NodeId) -> NodeId {
        let copy = self.clone_subtree(source);
        self.add_record(parent, copy.root())
    }

    /// Removes every child of `parent` under `key`, with their subtrees.
    ///
    /// Returns whether the key existed.
    pub fn remove_all(&mut self, parent: NodeId, key: &str) -> bool {
        let Some(removed) = self.slot_mut(parent).children.remove(key) else {
            return false;
        };
        let mut pending = removed;
        while let Some(id) = pending.pop() {
            if let Some(slot) = self.release(id) {
                pending.extend(slot.children.ids().copied());
            }
        }
        true
    }

    /// Deep copy of `id` and its descendants as a standalone document.
    ///
    /// The copy's root is the copied node; it has no parent and no listeners.
    #[must_use]
    pub fn clone_subtree(&self, id: NodeId) -> KvDocument {
        let source = self.node(id);
        let mut copy = KvDocument::new(source.key());
        let root = copy.root;
        copy.slot_mut(root).value = source.value().map(str::to_string);
        for child in source.children() {
            copy.add_record(root, child);
        }
        copy
    }

    /// Assigns the scalar value of `id` and notifies its listener.
    ///
    /// A node with children keeps reporting `None` until the children are gone.
    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) {
        self.replace_value(id, Some(value.into()));
    }

    /// Clears the scalar value of `id` and notifies its listener.
    pub fn clear_value(&mut self, id: NodeId) {
        self.replace_value(id, None);
    }

    /// Assigns a value given in its on-disk form, decoding `\"`.
    pub fn set_escaped_value(&mut self, id: NodeId, escaped: &str) {
        self.set_value(id, unescape(escaped));
    }

    /// Stores `value` and returns the previous stored value.
    pub fn replace_value(&mut self, id: NodeId, value: Option<String>) -> Option<String> {
        let slot = self.slot_mut(id);
        let old = std::mem::replace(&mut slot.value, value);
        if let Some(mut listener) = slot.listener.take() {
            listener(&ValueChange {
                node: id,
                key: &slot.key,
                old: old.as_deref(),
                new: slot.value.as_deref(),
            });
            slot.listener = Some(listener);
        }
        old
    }

    /// Installs the value-changed listener of `id`, replacing any previous one.
    ///
    /// The listener runs synchronously inside the setter, after the new value
    /// is stored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kvtree::KvDocument;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let mut doc = KvDocument::new("root");
    /// let root = doc.root_id();
    /// let hp = doc.add_leaf(root, "hp", "100");
    ///
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&seen);
    /// doc.on_value_changed(hp, move |change| {
    ///     sink.lock().unwrap().push((change.old.map(String::from), change.new.map(String::from)));
    /// });
    /// doc.set_value(hp, "90");
    ///
    /// assert_eq!(*seen.lock().unwrap(), vec![(Some("100".into()), Some("90".into()))]);
    /// ```
    pub fn on_value_changed<F>(&mut self, id: NodeId, listener: F)
    where
        F: FnMut(&ValueChange<'_>) + Send + 'static,
    {
        self.slot_mut(id).listener = Some(Box::new(listener));
    }

    /// Removes the value-changed listener of `id`, if any.
    pub fn clear_value_listener(&mut self, id: NodeId) {
        self.slot_mut(id).listener = None;
    }
}

impl Default for KvDocument {
    fn default() -> Self {
        KvDocument::new(crate::options::DEFAULT_ROOT_NAME)
    }
}

/// Deep, compacting copy. Listeners are not carried over.
impl Clone for KvDocument {
    fn clone(&self) -> Self {
        self.clone_subtree(self.root)
    }
}

impl PartialEq for KvDocument {
    fn eq(&self, other: &Self) -> bool {
        self.root() == other.root()
    }
}

impl fmt::Debug for KvDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KvDocument")
            .field("root", &self.root())
            .finish()
    }
}

impl serde::Serialize for KvDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.root().serialize(serializer)
    }
}
